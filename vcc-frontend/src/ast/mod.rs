//! Abstract Syntax Tree for Vocal
//! 
//! The parser (outside this workspace) builds these nodes; code generation
//! walks them once. Every node owns its children outright, so the tree has no
//! sharing and no cycles.

pub mod expressions;
pub mod statements;
pub mod ops;

pub use expressions::Expr;
pub use statements::Stmt;
pub use ops::RelOp;
