//! VuPP Virtual Machine
//!
//! Reads the assembly emitted by the Vocal compiler and executes it on a
//! model of the VuPP CPU: 64K words of memory, four general registers, a
//! downward growing stack, and carry and zero flags.

pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod vm;

// Re-export commonly used types
pub use assembler::assemble;
pub use config::VmConfig;
pub use error::VmError;
pub use vm::{DataLayout, Vm, VmState};
