//! Vocal Compiler - Frontend Interface
//! 
//! Lexing and parsing happen outside this workspace. This crate defines what
//! the parser hands over:
//! - AST: expression and statement nodes
//! - Program: the symbol table together with the statement list, loadable
//!   from the parser's JSON output

pub mod ast;
pub mod program;

pub use ast::{Expr, RelOp, Stmt};
pub use program::Program;
