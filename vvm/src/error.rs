//! Simulator errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VmError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Undefined label '{0}'")]
    UndefinedLabel(String),

    #[error("Label '{0}' defined more than once")]
    DuplicateLabel(String),

    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Data section needs {needed} words but only {available} are available")]
    DataOverflow { needed: u32, available: u32 },

    #[error("Operand '{operand}' cannot be written (instruction {pc})")]
    InvalidDestination { pc: usize, operand: String },

    #[error("Index {index} out of range for array '{name}'")]
    IndexOutOfRange { name: String, index: u16 },

    #[error("Stack underflow at instruction {pc}")]
    StackUnderflow { pc: usize },

    #[error("Stack collided with the data section at instruction {pc}")]
    StackOverflow { pc: usize },

    #[error("Step limit of {0} exceeded")]
    StepLimit(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for VmError {
    fn from(err: std::io::Error) -> Self {
        VmError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VmError {
    fn from(err: serde_json::Error) -> Self {
        VmError::Config(err.to_string())
    }
}
