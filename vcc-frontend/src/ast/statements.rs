//! Statement AST nodes for Vocal

use super::expressions::Expr;
use serde::{Deserialize, Serialize};

/// AST Statement nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// Statement list: everything in `prior` runs before `current`
    Sequence {
        #[serde(default)]
        prior: Option<Box<Stmt>>,
        current: Box<Stmt>,
    },

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        #[serde(default)]
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    /// Leave the value of `expr` on the stack and stop the machine
    Return {
        expr: Expr,
    },

    Assign {
        name: String,
        expr: Expr,
        line: u32,
    },

    ArrayAssign {
        array: String,
        index: Expr,
        expr: Expr,
        line: u32,
    },
}

impl Stmt {
    /// Chain statements into the left-nested list shape the parser produces
    pub fn sequence<I: IntoIterator<Item = Stmt>>(statements: I) -> Option<Stmt> {
        let mut list: Option<Stmt> = None;
        for statement in statements {
            list = Some(Stmt::Sequence {
                prior: list.map(Box::new),
                current: Box::new(statement),
            });
        }
        list
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn while_loop(condition: Expr, body: Stmt) -> Self {
        Stmt::While { condition, body: Box::new(body) }
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Return { expr }
    }

    pub fn assign(name: &str, expr: Expr, line: u32) -> Self {
        Stmt::Assign { name: name.to_string(), expr, line }
    }

    pub fn array_assign(array: &str, index: Expr, expr: Expr, line: u32) -> Self {
        Stmt::ArrayAssign { array: array.to_string(), index, expr, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_left_nested() {
        let list = Stmt::sequence(vec![
            Stmt::assign("a", Expr::int(1, 1), 1),
            Stmt::assign("b", Expr::int(2, 2), 2),
        ])
        .unwrap();

        match list {
            Stmt::Sequence { prior: Some(prior), current } => {
                assert_eq!(*current, Stmt::assign("b", Expr::int(2, 2), 2));
                match *prior {
                    Stmt::Sequence { prior: None, current } => {
                        assert_eq!(*current, Stmt::assign("a", Expr::int(1, 1), 1));
                    }
                    other => panic!("Expected list terminator, got {:?}", other),
                }
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sequence() {
        assert!(Stmt::sequence(Vec::new()).is_none());
    }

    #[test]
    fn test_if_without_else_json() {
        let json = r#"{
            "if": {
                "condition": { "identifier": { "name": "flag", "line": 4 } },
                "then_branch": { "return": { "expr": { "number": { "value": 1, "kind": "INT16", "line": 5 } } } }
            }
        }"#;
        let stmt: Stmt = serde_json::from_str(json).unwrap();
        assert_eq!(
            stmt,
            Stmt::if_else(Expr::ident("flag", 4), Stmt::ret(Expr::int(1, 5)), None)
        );
    }
}
