//! Statement code generation
//!
//! Statements leave the evaluation stack as they found it, apart from
//! `return`, which stops the machine with its value on top.

mod assignments;
mod control_flow;
mod jumps;

use crate::context::CodegenContext;
use log::debug;
use vcc_common::CompilerError;
use vcc_frontend::Stmt;

impl CodegenContext<'_> {
    /// Generate code for a statement
    pub fn generate_statement(&mut self, stmt: &Stmt) -> Result<(), CompilerError> {
        match stmt {
            Stmt::Sequence { .. } => control_flow::generate_sequence(self, stmt),
            Stmt::If { condition, then_branch, else_branch } => {
                debug!("generating if");
                control_flow::generate_if(self, condition, then_branch, else_branch.as_deref())
            }
            Stmt::While { condition, body } => {
                debug!("generating while");
                control_flow::generate_while(self, condition, body)
            }
            Stmt::Return { expr } => jumps::generate_return(self, expr),
            Stmt::Assign { name, expr, line } => {
                assignments::generate_assign(self, name, expr, *line)
            }
            Stmt::ArrayAssign { array, index, expr, line } => {
                assignments::generate_array_assign(self, array, index, expr, *line)
            }
        }
    }
}
