//! Leaf expressions: literals and scalar variables

use crate::context::CodegenContext;
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::{CompilerError, SymbolKind, ValueKind};

pub fn generate_number(
    ctx: &mut CodegenContext,
    value: u32,
    kind: ValueKind,
    line: u32,
) -> Result<ValueKind, CompilerError> {
    match kind {
        ValueKind::Int16 => {
            if value > u16::MAX as u32 {
                ctx.warning(line, format!("INT literal {} does not fit in 16 bits", value))
                    .add_note(format!("Truncated to {}", value & 0xFFFF));
            }
            ctx.emit(AsmInst::Push(Operand::Imm(value as u16)));
        }
        ValueKind::Int32 => {
            ctx.emit_all([
                AsmInst::Push(Operand::Imm((value >> 16) as u16)),
                AsmInst::Push(Operand::Imm(value as u16)),
            ]);
        }
        ValueKind::Error => {
            ctx.error(line, "Can't generate number".to_string());
        }
    }
    Ok(kind)
}

pub fn generate_identifier(
    ctx: &mut CodegenContext,
    name: &str,
    line: u32,
) -> Result<ValueKind, CompilerError> {
    let attrs = ctx.lookup(name, line)?;

    match attrs.kind {
        SymbolKind::Scalar16 => {
            let cell = ctx.memory_at(name);
            ctx.emit(AsmInst::Push(cell));
        }
        SymbolKind::Scalar32 => {
            // high word lives at the higher address and goes down first
            let address = ctx.address_of(name);
            ctx.emit_all([
                AsmInst::Copy(address, Reg::R0.into()),
                AsmInst::Inc(Reg::R0.into()),
                AsmInst::Push(Operand::Indirect(Reg::R0)),
                AsmInst::Dec(Reg::R0.into()),
                AsmInst::Push(Operand::Indirect(Reg::R0)),
            ]);
        }
        SymbolKind::Array16 | SymbolKind::Array32 => {
            ctx.error(line, format!("Array '{}' used without an index", name));
            return Ok(ValueKind::Error);
        }
    }
    Ok(attrs.kind.element_kind())
}
