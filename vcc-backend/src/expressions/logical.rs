//! AND / OR of truth values

use crate::context::CodegenContext;
use std::fmt;
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::{CompilerError, ValueKind};
use vcc_frontend::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// Combine two INT operands bitwise and normalize the result to 0 or 1
pub fn generate_logical(
    ctx: &mut CodegenContext,
    op: LogicalOp,
    left: &Expr,
    right: &Expr,
    line: u32,
) -> Result<ValueKind, CompilerError> {
    let Some((left_kind, right_kind)) = ctx.generate_operands(left, right)? else {
        return Ok(ValueKind::Error);
    };

    if left_kind != ValueKind::Int16 || right_kind != ValueKind::Int16 {
        ctx.error(line, format!("LONG type used in {} expression", op));
        ctx.discard(right_kind);
        ctx.discard(left_kind);
        return Ok(ValueKind::Error);
    }

    let done = ctx.new_label();
    let combine = match op {
        LogicalOp::And => AsmInst::And(Reg::R1.into(), Reg::R0.into()),
        LogicalOp::Or => AsmInst::Or(Reg::R1.into(), Reg::R0.into()),
    };
    ctx.emit_all([
        AsmInst::Pop(Reg::R1.into()),
        AsmInst::Pop(Reg::R0.into()),
        AsmInst::Copy(Operand::Imm(0), Reg::R2.into()),
        combine,
        AsmInst::Jz(done.clone()),
        AsmInst::Copy(Operand::Imm(1), Reg::R2.into()),
    ]);
    ctx.place_label(&done);
    ctx.emit(AsmInst::Push(Reg::R2.into()));

    Ok(ValueKind::Int16)
}
