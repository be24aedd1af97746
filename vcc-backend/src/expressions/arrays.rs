//! Array element access
//!
//! Elements are laid out consecutively from the array's base address. A LONG
//! element takes two words, low word first, so its offset is `index << 1`.

use crate::context::CodegenContext;
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::{CompilerError, SymbolKind, ValueKind};
use vcc_frontend::Expr;

pub fn generate_array_index(
    ctx: &mut CodegenContext,
    array: &str,
    index: &Expr,
    line: u32,
) -> Result<ValueKind, CompilerError> {
    let attrs = ctx.lookup(array, line)?;

    let index_kind = ctx.generate_expression(index)?;
    if !truncate_index(ctx, array, index_kind, line) {
        return Ok(ValueKind::Error);
    }

    if !attrs.kind.is_array() {
        ctx.error(line, format!("'{}' is not an array", array));
        ctx.discard(ValueKind::Int16);
        return Ok(ValueKind::Error);
    }

    element_address(ctx, array, attrs.kind);
    match attrs.kind {
        SymbolKind::Array32 => {
            ctx.emit_all([
                AsmInst::Inc(Reg::R1.into()),
                AsmInst::Push(Operand::Indirect(Reg::R1)),
                AsmInst::Dec(Reg::R1.into()),
                AsmInst::Push(Operand::Indirect(Reg::R1)),
            ]);
        }
        _ => ctx.emit(AsmInst::Push(Operand::Indirect(Reg::R1))),
    }
    Ok(attrs.kind.element_kind())
}

/// Reduce the index on top of the stack to a single word
///
/// Returns false when the index expression itself failed.
pub(crate) fn truncate_index(
    ctx: &mut CodegenContext,
    array: &str,
    kind: ValueKind,
    line: u32,
) -> bool {
    match kind {
        ValueKind::Error => false,
        ValueKind::Int16 => true,
        ValueKind::Int32 => {
            ctx.warning(line, format!("LONG expression used as index into array {}", array))
                .add_note("Only lower word will be used".to_string());
            ctx.emit_all([
                AsmInst::Pop(Reg::R0.into()),
                AsmInst::Pop(Reg::R1.into()),
                AsmInst::Push(Reg::R0.into()),
            ]);
            true
        }
    }
}

/// Pop the index and leave the address of the selected element in r1
pub(crate) fn element_address(ctx: &mut CodegenContext, array: &str, kind: SymbolKind) {
    ctx.emit(AsmInst::Pop(Reg::R0.into()));
    if kind == SymbolKind::Array32 {
        ctx.emit_all([AsmInst::Clc, AsmInst::Shl(Reg::R0.into())]);
    }
    let base = ctx.address_of(array);
    ctx.emit_all([
        AsmInst::Copy(base, Reg::R1.into()),
        AsmInst::Clc,
        AsmInst::Add(Reg::R0.into(), Reg::R1.into()),
    ]);
}
