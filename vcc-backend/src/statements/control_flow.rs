//! Statement lists, if/else and while

use crate::context::CodegenContext;
use vcc_codegen::{AsmInst, Label, Operand, Reg};
use vcc_common::{CompilerError, ValueKind};
use vcc_frontend::{Expr, Stmt};

/// Generate a left-nested statement list in source order
///
/// The list is walked iteratively; long programs nest very deeply.
pub fn generate_sequence(ctx: &mut CodegenContext, list: &Stmt) -> Result<(), CompilerError> {
    let mut pending = Vec::new();
    let mut node = Some(list);
    while let Some(stmt) = node {
        match stmt {
            Stmt::Sequence { prior, current } => {
                pending.push(current.as_ref());
                node = prior.as_deref();
            }
            other => {
                pending.push(other);
                node = None;
            }
        }
    }

    for stmt in pending.into_iter().rev() {
        ctx.generate_statement(stmt)?;
    }
    Ok(())
}

/// Pop a condition value and branch to `target` if it is zero
///
/// A failed condition has nothing on the stack, so no test is emitted.
fn branch_if_false(ctx: &mut CodegenContext, kind: ValueKind, target: &Label) {
    match kind {
        ValueKind::Int16 => ctx.emit_all([
            AsmInst::Pop(Reg::R0.into()),
            AsmInst::Cmp(Reg::R0.into(), Operand::Imm(0)),
            AsmInst::Jz(target.clone()),
        ]),
        ValueKind::Int32 => ctx.emit_all([
            AsmInst::Pop(Reg::R0.into()),
            AsmInst::Pop(Reg::R1.into()),
            AsmInst::Or(Reg::R1.into(), Reg::R0.into()),
            AsmInst::Jz(target.clone()),
        ]),
        ValueKind::Error => {}
    }
}

pub fn generate_if(
    ctx: &mut CodegenContext,
    condition: &Expr,
    then_branch: &Stmt,
    else_branch: Option<&Stmt>,
) -> Result<(), CompilerError> {
    let else_label = ctx.new_label();
    let end_label = ctx.new_label();

    let kind = ctx.generate_expression(condition)?;
    branch_if_false(ctx, kind, &else_label);

    ctx.generate_statement(then_branch)?;
    ctx.emit(AsmInst::Jmp(end_label.clone()));

    ctx.place_label(&else_label);
    if let Some(else_branch) = else_branch {
        ctx.generate_statement(else_branch)?;
    }
    ctx.place_label(&end_label);
    Ok(())
}

pub fn generate_while(
    ctx: &mut CodegenContext,
    condition: &Expr,
    body: &Stmt,
) -> Result<(), CompilerError> {
    let top = ctx.new_label();
    let exit = ctx.new_label();

    ctx.place_label(&top);
    let kind = ctx.generate_expression(condition)?;
    branch_if_false(ctx, kind, &exit);

    ctx.generate_statement(body)?;
    ctx.emit(AsmInst::Jmp(top.clone()));
    ctx.place_label(&exit);
    Ok(())
}
