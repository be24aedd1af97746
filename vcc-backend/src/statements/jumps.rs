//! Return statement

use crate::context::CodegenContext;
use log::debug;
use vcc_codegen::AsmInst;
use vcc_common::CompilerError;
use vcc_frontend::Expr;

/// Evaluate the result and stop; the value stays on the stack for the host
pub fn generate_return(ctx: &mut CodegenContext, expr: &Expr) -> Result<(), CompilerError> {
    let kind = ctx.generate_expression(expr)?;
    debug!("return of {} at line {}", kind, expr.line());
    ctx.emit(AsmInst::Halt);
    Ok(())
}
