//! Multiplication and division
//!
//! The machine has neither, so both are loops: repeated addition counting
//! the multiplier down, and repeated subtraction counting quotient steps up.
//! Only INT operands are supported.

use crate::context::CodegenContext;
use vcc_codegen::{AsmInst, Operand, Reg};
use vcc_common::{CompilerError, ValueKind};
use vcc_frontend::Expr;

/// Generate both operands and check they are INT, reporting `message` if not
fn int_operands(
    ctx: &mut CodegenContext,
    left: &Expr,
    right: &Expr,
    line: u32,
    message: &str,
) -> Result<bool, CompilerError> {
    let Some((left_kind, right_kind)) = ctx.generate_operands(left, right)? else {
        return Ok(false);
    };

    if left_kind != ValueKind::Int16 || right_kind != ValueKind::Int16 {
        ctx.error(line, message.to_string());
        ctx.discard(right_kind);
        ctx.discard(left_kind);
        return Ok(false);
    }
    Ok(true)
}

pub fn generate_mul(
    ctx: &mut CodegenContext,
    left: &Expr,
    right: &Expr,
    line: u32,
) -> Result<ValueKind, CompilerError> {
    if !int_operands(ctx, left, right, line, "Multiplication only supported with INTs")? {
        return Ok(ValueKind::Error);
    }

    let top = ctx.new_label();
    let done = ctx.new_label();

    // r0 = multiplier (counts down), r1 = multiplicand, r2 = product
    ctx.emit_all([
        AsmInst::Pop(Reg::R0.into()),
        AsmInst::Pop(Reg::R1.into()),
        AsmInst::Copy(Operand::Imm(0), Reg::R2.into()),
    ]);
    ctx.place_label(&top);
    ctx.emit_all([
        AsmInst::Cmp(Reg::R0.into(), Operand::Imm(0)),
        AsmInst::Jz(done.clone()),
        AsmInst::Clc,
        AsmInst::Add(Reg::R1.into(), Reg::R2.into()),
        AsmInst::Dec(Reg::R0.into()),
        AsmInst::Jmp(top.clone()),
    ]);
    ctx.place_label(&done);
    ctx.emit(AsmInst::Push(Reg::R2.into()));

    Ok(ValueKind::Int16)
}

pub fn generate_div(
    ctx: &mut CodegenContext,
    left: &Expr,
    right: &Expr,
    line: u32,
) -> Result<ValueKind, CompilerError> {
    if !int_operands(ctx, left, right, line, "Division only supported with INTs")? {
        return Ok(ValueKind::Error);
    }

    if right.as_literal() == Some(0) {
        ctx.error(line, "Division by zero".to_string());
        ctx.discard(ValueKind::Int16);
        ctx.discard(ValueKind::Int16);
        return Ok(ValueKind::Error);
    }

    let top = ctx.new_label();
    let done = ctx.new_label();

    // r0 = divisor, r1 = remainder, r2 = quotient
    ctx.emit_all([
        AsmInst::Pop(Reg::R0.into()),
        AsmInst::Pop(Reg::R1.into()),
        AsmInst::Copy(Operand::Imm(0), Reg::R2.into()),
    ]);
    if ctx.config.guard_division_by_zero {
        ctx.emit_all([
            AsmInst::Cmp(Reg::R0.into(), Operand::Imm(0)),
            AsmInst::Jz(done.clone()),
        ]);
    }
    ctx.place_label(&top);
    ctx.emit_all([
        AsmInst::Clc,
        AsmInst::Sub(Reg::R0.into(), Reg::R1.into()),
        AsmInst::Jc(done.clone()),
        AsmInst::Inc(Reg::R2.into()),
        AsmInst::Jmp(top.clone()),
    ]);
    ctx.place_label(&done);
    ctx.emit(AsmInst::Push(Reg::R2.into()));

    Ok(ValueKind::Int16)
}
