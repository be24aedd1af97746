//! Comparisons
//!
//! All six relations compare unsigned and yield an INT holding 0 or 1,
//! whatever the width of the operands.

use crate::context::CodegenContext;
use crate::promote::promote_operands;
use vcc_codegen::{AsmInst, Label, Operand, Reg};
use vcc_common::{CompilerError, ValueKind};
use vcc_frontend::{Expr, RelOp};

pub fn generate_relational(
    ctx: &mut CodegenContext,
    op: RelOp,
    left: &Expr,
    right: &Expr,
) -> Result<ValueKind, CompilerError> {
    let Some((left_kind, right_kind)) = ctx.generate_operands(left, right)? else {
        return Ok(ValueKind::Error);
    };

    match promote_operands(ctx, left_kind, right_kind) {
        ValueKind::Int32 => compare_longs(ctx, op),
        _ => compare_ints(ctx, op),
    }
    Ok(ValueKind::Int16)
}

/// `cmp` ordered so that the carry flag is set exactly when the relation
/// holds or the words are equal
fn compare(op: RelOp, left: Reg, right: Reg) -> AsmInst {
    match op {
        RelOp::Gt | RelOp::Ge => AsmInst::Cmp(left.into(), right.into()),
        RelOp::Eq | RelOp::Ne | RelOp::Lt | RelOp::Le => AsmInst::Cmp(right.into(), left.into()),
    }
}

/// Branches that leave for `target` when the preceding `compare` shows the
/// relation does not hold
fn branch_unless(op: RelOp, target: &Label) -> Vec<AsmInst> {
    match op {
        RelOp::Eq => vec![AsmInst::Jnz(target.clone())],
        RelOp::Ne => vec![AsmInst::Jz(target.clone())],
        RelOp::Lt | RelOp::Gt => vec![AsmInst::Jz(target.clone()), AsmInst::Jnc(target.clone())],
        RelOp::Le | RelOp::Ge => vec![AsmInst::Jnc(target.clone())],
    }
}

fn compare_ints(ctx: &mut CodegenContext, op: RelOp) {
    let done = ctx.new_label();

    ctx.emit_all([
        AsmInst::Pop(Reg::R1.into()),
        AsmInst::Pop(Reg::R0.into()),
        AsmInst::Copy(Operand::Imm(0), Reg::R2.into()),
        compare(op, Reg::R0, Reg::R1),
    ]);
    ctx.emit_all(branch_unless(op, &done));
    ctx.emit(AsmInst::Copy(Operand::Imm(1), Reg::R2.into()));
    ctx.place_label(&done);
    ctx.emit(AsmInst::Push(Reg::R2.into()));
}

/// High words decide unless they are equal, then the low words decide
fn compare_longs(ctx: &mut CodegenContext, op: RelOp) {
    let is_true = ctx.new_label();
    let is_false = ctx.new_label();
    let done = ctx.new_label();

    // r3:r2 = left, r1:r0 = right
    ctx.emit_all([
        AsmInst::Pop(Reg::R0.into()),
        AsmInst::Pop(Reg::R1.into()),
        AsmInst::Pop(Reg::R2.into()),
        AsmInst::Pop(Reg::R3.into()),
        compare(op, Reg::R3, Reg::R1),
    ]);

    match op {
        RelOp::Eq => ctx.emit(AsmInst::Jnz(is_false.clone())),
        RelOp::Ne => ctx.emit(AsmInst::Jnz(is_true.clone())),
        RelOp::Lt | RelOp::Gt | RelOp::Le | RelOp::Ge => {
            let low_words = ctx.new_label();
            ctx.emit_all([
                AsmInst::Jz(low_words.clone()),
                AsmInst::Jnc(is_false.clone()),
                AsmInst::Jmp(is_true.clone()),
            ]);
            ctx.place_label(&low_words);
        }
    }

    ctx.emit(compare(op, Reg::R2, Reg::R0));
    ctx.emit_all(branch_unless(op, &is_false));

    ctx.place_label(&is_true);
    ctx.emit_all([AsmInst::Push(Operand::Imm(1)), AsmInst::Jmp(done.clone())]);
    ctx.place_label(&is_false);
    ctx.emit(AsmInst::Push(Operand::Imm(0)));
    ctx.place_label(&done);
}
