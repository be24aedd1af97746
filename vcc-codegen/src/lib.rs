//! Vocal Compiler - VuPP Instruction Model
//! 
//! This crate holds the pieces of code generation that know nothing about the
//! source language:
//! 
//! - Assembly instruction and operand definitions for the VuPP machine
//! - Label allocation
//! - The append-only instruction sink and text emission

pub mod asm;
pub mod labels;
pub mod emit;

pub use asm::{AsmInst, Operand, Reg};
pub use labels::{Label, LabelAllocator};
pub use emit::{emit_instructions, InstructionSink};
