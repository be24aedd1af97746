//! Program container handed from the parser to code generation
//!
//! The external parser serialises its output as JSON: the symbol table plus
//! the top-level statement list. The list is folded into the left-nested
//! [`Stmt::Sequence`] shape on load.

use crate::ast::Stmt;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use vcc_common::{CompilerError, SymbolTable};

/// On-disk layout of a parsed program
#[derive(Deserialize)]
struct ProgramFile {
    #[serde(default)]
    symbols: SymbolTable,
    #[serde(default)]
    body: Vec<Stmt>,
}

/// A parsed program: its declarations and its single flat body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProgramFile")]
pub struct Program {
    pub symbols: SymbolTable,
    pub body: Option<Stmt>,
}

impl From<ProgramFile> for Program {
    fn from(file: ProgramFile) -> Self {
        Program {
            symbols: file.symbols,
            body: Stmt::sequence(file.body),
        }
    }
}

impl Program {
    pub fn new(symbols: SymbolTable, body: Option<Stmt>) -> Self {
        Self { symbols, body }
    }

    /// Parse a program from its JSON form
    pub fn from_json(source: &str) -> Result<Program, CompilerError> {
        let program: Program = serde_json::from_str(source)?;
        debug!("loaded program with {} symbols", program.symbols.len());
        Ok(program)
    }

    /// Read and parse a program file
    pub fn load(path: &Path) -> Result<Program, CompilerError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use vcc_common::{SymbolAttrs, SymbolKind};

    #[test]
    fn test_load_program_json() {
        let source = r#"{
            "symbols": {
                "x": { "kind": "SCALAR32" },
                "data": { "kind": "ARRAY16", "element_count": 3 }
            },
            "body": [
                { "assign": { "name": "x", "expr": { "number": { "value": 5, "kind": "INT16", "line": 1 } }, "line": 1 } },
                { "return": { "expr": { "identifier": { "name": "x", "line": 2 } } } }
            ]
        }"#;

        let program = Program::from_json(source).unwrap();
        assert_eq!(program.symbols.lookup("x"), Some(&SymbolAttrs::scalar(SymbolKind::Scalar32)));
        assert_eq!(
            program.body,
            Stmt::sequence(vec![
                Stmt::assign("x", Expr::int(5, 1), 1),
                Stmt::ret(Expr::ident("x", 2)),
            ])
        );
    }

    #[test]
    fn test_empty_program() {
        let program = Program::from_json("{}").unwrap();
        assert!(program.symbols.is_empty());
        assert!(program.body.is_none());
    }

    #[test]
    fn test_malformed_program_is_rejected() {
        let result = Program::from_json(r#"{ "body": [ { "goto": {} } ] }"#);
        assert!(matches!(result, Err(CompilerError::InvalidProgram { .. })));
    }
}
