//! Expression AST nodes for Vocal

use super::ops::RelOp;
use serde::{Deserialize, Serialize};
use vcc_common::ValueKind;

/// AST Expression nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Boolean AND of two relational results
    And {
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    /// Boolean OR of two relational results
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    /// Comparison producing 0 or 1
    Relational {
        op: RelOp,
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    Add {
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    Sub {
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    Mul {
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    Div {
        left: Box<Expr>,
        right: Box<Expr>,
        line: u32,
    },

    /// Integer literal; `kind` is the width the front end assigned to it
    Number {
        value: u32,
        kind: ValueKind,
        line: u32,
    },

    /// Scalar variable reference
    Identifier {
        name: String,
        line: u32,
    },

    /// Array element reference
    ArrayIndex {
        array: String,
        index: Box<Expr>,
        line: u32,
    },
}

impl Expr {
    pub fn and(left: Expr, right: Expr, line: u32) -> Self {
        Expr::And { left: Box::new(left), right: Box::new(right), line }
    }

    pub fn or(left: Expr, right: Expr, line: u32) -> Self {
        Expr::Or { left: Box::new(left), right: Box::new(right), line }
    }

    pub fn relational(op: RelOp, left: Expr, right: Expr, line: u32) -> Self {
        Expr::Relational { op, left: Box::new(left), right: Box::new(right), line }
    }

    pub fn add(left: Expr, right: Expr, line: u32) -> Self {
        Expr::Add { left: Box::new(left), right: Box::new(right), line }
    }

    pub fn sub(left: Expr, right: Expr, line: u32) -> Self {
        Expr::Sub { left: Box::new(left), right: Box::new(right), line }
    }

    pub fn mul(left: Expr, right: Expr, line: u32) -> Self {
        Expr::Mul { left: Box::new(left), right: Box::new(right), line }
    }

    pub fn div(left: Expr, right: Expr, line: u32) -> Self {
        Expr::Div { left: Box::new(left), right: Box::new(right), line }
    }

    /// INT literal
    pub fn int(value: u16, line: u32) -> Self {
        Expr::Number { value: value as u32, kind: ValueKind::Int16, line }
    }

    /// LONG literal
    pub fn long(value: u32, line: u32) -> Self {
        Expr::Number { value, kind: ValueKind::Int32, line }
    }

    pub fn ident(name: &str, line: u32) -> Self {
        Expr::Identifier { name: name.to_string(), line }
    }

    pub fn index(array: &str, index: Expr, line: u32) -> Self {
        Expr::ArrayIndex { array: array.to_string(), index: Box::new(index), line }
    }

    /// Source line the node was built from
    pub fn line(&self) -> u32 {
        match self {
            Expr::And { line, .. }
            | Expr::Or { line, .. }
            | Expr::Relational { line, .. }
            | Expr::Add { line, .. }
            | Expr::Sub { line, .. }
            | Expr::Mul { line, .. }
            | Expr::Div { line, .. }
            | Expr::Number { line, .. }
            | Expr::Identifier { line, .. }
            | Expr::ArrayIndex { line, .. } => *line,
        }
    }

    /// The value a number literal puts on the stack; INT keeps its low word
    pub fn as_literal(&self) -> Option<u32> {
        match self {
            Expr::Number { value, kind: ValueKind::Int16, .. } => Some(value & 0xFFFF),
            Expr::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let expr = Expr::add(Expr::ident("x", 3), Expr::long(70000, 3), 3);
        match &expr {
            Expr::Add { left, right, line } => {
                assert_eq!(**left, Expr::Identifier { name: "x".to_string(), line: 3 });
                assert_eq!(right.as_literal(), Some(70000));
                assert_eq!(*line, 3);
            }
            _ => panic!("Expected add node"),
        }
        assert_eq!(expr.line(), 3);
        assert_eq!(expr.as_literal(), None);
    }

    #[test]
    fn test_int_literal_value_is_truncated() {
        let wide = Expr::Number { value: 0x1_0000, kind: ValueKind::Int16, line: 1 };
        assert_eq!(wide.as_literal(), Some(0));
        assert_eq!(Expr::long(0x1_0000, 1).as_literal(), Some(0x1_0000));
    }

    #[test]
    fn test_expression_json() {
        let json = r#"{
            "relational": {
                "op": "LT",
                "left": { "identifier": { "name": "a", "line": 2 } },
                "right": { "number": { "value": 10, "kind": "INT16", "line": 2 } },
                "line": 2
            }
        }"#;
        let expr: Expr = serde_json::from_str(json).unwrap();
        assert_eq!(
            expr,
            Expr::relational(RelOp::Lt, Expr::ident("a", 2), Expr::int(10, 2), 2)
        );
    }
}
