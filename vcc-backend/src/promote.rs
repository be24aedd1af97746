//! Operand width promotion
//!
//! Binary operators work on operands of one width. When exactly one side is
//! LONG the INT side is widened in place on the stack by inserting a zero
//! high word beneath it.

use crate::context::CodegenContext;
use log::trace;
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::ValueKind;

/// Bring the two topmost stack values to a common width
///
/// Expects `left` beneath `right` on the stack and neither to be an error.
/// Returns the common kind.
pub fn promote_operands(ctx: &mut CodegenContext, left: ValueKind, right: ValueKind) -> ValueKind {
    match (left, right) {
        (ValueKind::Int32, ValueKind::Int16) => {
            trace!("promoting right operand to LONG");
            ctx.emit_all([
                AsmInst::Pop(Reg::R0.into()),
                AsmInst::Push(Operand::Imm(0)),
                AsmInst::Push(Reg::R0.into()),
            ]);
            ValueKind::Int32
        }
        (ValueKind::Int16, ValueKind::Int32) => {
            trace!("promoting left operand to LONG");
            ctx.emit_all([
                // right low, right high, left
                AsmInst::Pop(Reg::R2.into()),
                AsmInst::Pop(Reg::R1.into()),
                AsmInst::Pop(Reg::R0.into()),
                AsmInst::Push(Operand::Imm(0)),
                AsmInst::Push(Reg::R0.into()),
                AsmInst::Push(Reg::R1.into()),
                AsmInst::Push(Reg::R2.into()),
            ]);
            ValueKind::Int32
        }
        (ValueKind::Int32, ValueKind::Int32) => ValueKind::Int32,
        _ => ValueKind::Int16,
    }
}
