//! Addition and subtraction, INT or LONG

use crate::context::CodegenContext;
use crate::promote::promote_operands;
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::{CompilerError, ValueKind};
use vcc_frontend::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
}

impl ArithOp {
    /// `dst = dst op src`, carry in and carry out
    fn instruction(self, src: Reg, dst: Reg) -> AsmInst {
        let (src, dst): (Operand, Operand) = (src.into(), dst.into());
        match self {
            ArithOp::Add => AsmInst::Add(src, dst),
            ArithOp::Sub => AsmInst::Sub(src, dst),
        }
    }
}

pub fn generate_add_sub(
    ctx: &mut CodegenContext,
    op: ArithOp,
    left: &Expr,
    right: &Expr,
) -> Result<ValueKind, CompilerError> {
    let Some((left_kind, right_kind)) = ctx.generate_operands(left, right)? else {
        return Ok(ValueKind::Error);
    };

    let kind = promote_operands(ctx, left_kind, right_kind);
    match kind {
        ValueKind::Int32 => {
            // r3:r2 = left, r1:r0 = right; the carry ripples from low to high
            ctx.emit_all([
                AsmInst::Pop(Reg::R0.into()),
                AsmInst::Pop(Reg::R1.into()),
                AsmInst::Pop(Reg::R2.into()),
                AsmInst::Pop(Reg::R3.into()),
                AsmInst::Clc,
                op.instruction(Reg::R0, Reg::R2),
                op.instruction(Reg::R1, Reg::R3),
                AsmInst::Push(Reg::R3.into()),
                AsmInst::Push(Reg::R2.into()),
            ]);
        }
        _ => {
            ctx.emit_all([
                AsmInst::Pop(Reg::R1.into()),
                AsmInst::Pop(Reg::R0.into()),
                AsmInst::Clc,
                op.instruction(Reg::R1, Reg::R0),
                AsmInst::Push(Reg::R0.into()),
            ]);
        }
    }
    Ok(kind)
}
