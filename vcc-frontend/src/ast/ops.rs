//! Operator definitions for Vocal

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelOp {
    Eq, Ne, Lt, Gt, Le, Ge,
}

impl RelOp {
    pub const ALL: [RelOp; 6] = [RelOp::Eq, RelOp::Ne, RelOp::Lt, RelOp::Gt, RelOp::Le, RelOp::Ge];

    /// Evaluate the relation on unsigned operands
    pub fn holds<T: PartialOrd>(&self, left: T, right: T) -> bool {
        match self {
            RelOp::Eq => left == right,
            RelOp::Ne => left != right,
            RelOp::Lt => left < right,
            RelOp::Gt => left > right,
            RelOp::Le => left <= right,
            RelOp::Ge => left >= right,
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Lt => "<",
            RelOp::Gt => ">",
            RelOp::Le => "<=",
            RelOp::Ge => ">=",
        };
        write!(f, "{}", op_str)
    }
}
