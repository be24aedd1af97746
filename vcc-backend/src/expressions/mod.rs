//! Expression code generation
//!
//! Every expression leaves its value on the evaluation stack and reports the
//! kind of that value. INT occupies one word; LONG occupies two with the low
//! word on top. `ValueKind::Error` means the problem was already reported;
//! callers must propagate it without reporting again.

mod arithmetic;
mod arrays;
mod logical;
mod mul_div;
mod operands;
mod relational;

pub(crate) use arrays::{element_address, truncate_index};

use crate::context::CodegenContext;
use log::trace;
use vcc_common::{CompilerError, ValueKind};
use vcc_frontend::Expr;

use arithmetic::ArithOp;
use logical::LogicalOp;

impl CodegenContext<'_> {
    /// Generate code for an expression
    pub fn generate_expression(&mut self, expr: &Expr) -> Result<ValueKind, CompilerError> {
        trace!("generating expression at line {}", expr.line());
        match expr {
            Expr::And { left, right, line } => {
                logical::generate_logical(self, LogicalOp::And, left, right, *line)
            }
            Expr::Or { left, right, line } => {
                logical::generate_logical(self, LogicalOp::Or, left, right, *line)
            }
            Expr::Relational { op, left, right, line: _ } => {
                relational::generate_relational(self, *op, left, right)
            }
            Expr::Add { left, right, line: _ } => {
                arithmetic::generate_add_sub(self, ArithOp::Add, left, right)
            }
            Expr::Sub { left, right, line: _ } => {
                arithmetic::generate_add_sub(self, ArithOp::Sub, left, right)
            }
            Expr::Mul { left, right, line } => mul_div::generate_mul(self, left, right, *line),
            Expr::Div { left, right, line } => mul_div::generate_div(self, left, right, *line),
            Expr::Number { value, kind, line } => {
                operands::generate_number(self, *value, *kind, *line)
            }
            Expr::Identifier { name, line } => operands::generate_identifier(self, name, *line),
            Expr::ArrayIndex { array, index, line } => {
                arrays::generate_array_index(self, array, index, *line)
            }
        }
    }

    /// Generate both operands of a binary operator, left first
    ///
    /// Returns `None` when either side failed; whatever the other side pushed
    /// has been dropped again so the stack is as it was before.
    pub(crate) fn generate_operands(
        &mut self,
        left: &Expr,
        right: &Expr,
    ) -> Result<Option<(ValueKind, ValueKind)>, CompilerError> {
        let left_kind = self.generate_expression(left)?;
        let right_kind = self.generate_expression(right)?;

        if left_kind.is_error() || right_kind.is_error() {
            self.discard(right_kind);
            self.discard(left_kind);
            return Ok(None);
        }
        Ok(Some((left_kind, right_kind)))
    }
}
