//! Stores to scalars and array elements
//!
//! An INT value stored into a LONG destination is widened silently with a
//! zero high word. A LONG value stored into an INT destination keeps its low
//! word and draws a warning.

use crate::context::CodegenContext;
use crate::expressions::{element_address, truncate_index};
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::{CompilerError, SymbolKind, ValueKind};
use vcc_frontend::Expr;

fn warn_narrowing(ctx: &mut CodegenContext, target: &str, kind: SymbolKind, line: u32) {
    ctx.warning(line, format!("LONG expression assigned to {} {}", kind, target))
        .add_note("Only lower word will be used".to_string());
}

pub fn generate_assign(
    ctx: &mut CodegenContext,
    name: &str,
    expr: &Expr,
    line: u32,
) -> Result<(), CompilerError> {
    let attrs = ctx.lookup(name, line)?;

    let kind = ctx.generate_expression(expr)?;
    if kind.is_error() {
        return Ok(());
    }

    match (attrs.kind, kind) {
        (SymbolKind::Scalar16, ValueKind::Int16) => {
            let cell = ctx.memory_at(name);
            ctx.emit(AsmInst::Pop(cell));
        }
        (SymbolKind::Scalar16, _) => {
            warn_narrowing(ctx, name, attrs.kind, line);
            let cell = ctx.memory_at(name);
            ctx.emit_all([AsmInst::Pop(cell), AsmInst::Pop(Reg::R0.into())]);
        }
        (SymbolKind::Scalar32, _) => {
            let address = ctx.address_of(name);
            ctx.emit_all([
                AsmInst::Copy(address, Reg::R0.into()),
                AsmInst::Pop(Operand::Indirect(Reg::R0)),
                AsmInst::Inc(Reg::R0.into()),
            ]);
            store_high_word(ctx, Reg::R0, kind);
        }
        (SymbolKind::Array16 | SymbolKind::Array32, _) => {
            ctx.error(line, format!("Array '{}' assigned without an index", name));
            ctx.discard(kind);
        }
    }
    Ok(())
}

pub fn generate_array_assign(
    ctx: &mut CodegenContext,
    array: &str,
    index: &Expr,
    expr: &Expr,
    line: u32,
) -> Result<(), CompilerError> {
    let attrs = ctx.lookup(array, line)?;

    let kind = ctx.generate_expression(expr)?;
    if kind.is_error() {
        return Ok(());
    }

    let index_kind = ctx.generate_expression(index)?;
    if !truncate_index(ctx, array, index_kind, line) {
        ctx.discard(kind);
        return Ok(());
    }

    if !attrs.kind.is_array() {
        ctx.error(line, format!("'{}' is not an array", array));
        ctx.discard(ValueKind::Int16);
        ctx.discard(kind);
        return Ok(());
    }

    element_address(ctx, array, attrs.kind);
    ctx.emit(AsmInst::Pop(Operand::Indirect(Reg::R1)));
    match (attrs.kind, kind) {
        (SymbolKind::Array32, _) => {
            ctx.emit(AsmInst::Inc(Reg::R1.into()));
            store_high_word(ctx, Reg::R1, kind);
        }
        (_, ValueKind::Int32) => {
            warn_narrowing(ctx, array, attrs.kind, line);
            ctx.emit(AsmInst::Pop(Reg::R0.into()));
        }
        _ => {}
    }
    Ok(())
}

/// Fill the high word of a LONG destination at `(pointer)`
fn store_high_word(ctx: &mut CodegenContext, pointer: Reg, kind: ValueKind) {
    match kind {
        ValueKind::Int32 => ctx.emit(AsmInst::Pop(Operand::Indirect(pointer))),
        _ => ctx.emit(AsmInst::Copy(Operand::Imm(0), Operand::Indirect(pointer))),
    }
}
