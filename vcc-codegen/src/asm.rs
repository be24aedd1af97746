//! VuPP Assembly Instruction Definitions
//!
//! This module defines the instruction set and register model for the VuPP
//! stack machine targeted by the Vocal compiler.

use crate::labels::Label;
use std::fmt;

/// VuPP general purpose registers
///
/// The machine exposes four 16-bit registers. The stack pointer exists but is
/// only manipulated implicitly by `push` and `pop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    R0, R1, R2, R3,
}

impl Reg {
    pub fn index(&self) -> usize {
        match self {
            Reg::R0 => 0,
            Reg::R1 => 1,
            Reg::R2 => 2,
            Reg::R3 => 3,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::R0 => write!(f, "r0"),
            Reg::R1 => write!(f, "r1"),
            Reg::R2 => write!(f, "r2"),
            Reg::R3 => write!(f, "r3"),
        }
    }
}

/// Instruction operand
///
/// Symbol names are stored already decorated with the memory-operand marker
/// (for example `_count`), so printing never needs configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Register direct: `r0`
    Reg(Reg),
    /// Immediate word: `42`
    Imm(u16),
    /// Address of a named variable used as an immediate: `_x`
    Address(String),
    /// Memory cell at a named address: `(_x)`
    Memory(String),
    /// Memory cell addressed by a register: `(r1)`
    Indirect(Reg),
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

impl From<u16> for Operand {
    fn from(value: u16) -> Self {
        Operand::Imm(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Imm(value) => write!(f, "{}", value),
            Operand::Address(symbol) => write!(f, "{}", symbol),
            Operand::Memory(symbol) => write!(f, "({})", symbol),
            Operand::Indirect(reg) => write!(f, "({})", reg),
        }
    }
}

/// VuPP Assembly Instructions
///
/// Two-operand instructions are written `op src, dst`; arithmetic stores its
/// result in `dst`. `add` and `sub` consume the carry flag, so a `clc` must
/// precede the first word of any sum or difference.
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    // Stack
    Push(Operand),                // push src
    Pop(Operand),                 // dst = pop

    // Data movement
    Copy(Operand, Operand),       // dst = src (flags untouched)

    // Arithmetic (carry in, carry out)
    Add(Operand, Operand),        // dst = dst + src + C
    Sub(Operand, Operand),        // dst = dst - src - C
    Inc(Operand),                 // dst = dst + 1
    Dec(Operand),                 // dst = dst - 1
    Shl(Operand),                 // dst = dst << 1, C = bit shifted out
    Clc,                          // C = 0

    // Logical
    And(Operand, Operand),        // dst = dst & src
    Or(Operand, Operand),         // dst = dst | src

    // Comparison: Z = (dst == src), C = !(dst > src), unsigned
    Cmp(Operand, Operand),

    // Control Flow
    Jmp(Label),
    Jz(Label),
    Jnz(Label),
    Jc(Label),
    Jnc(Label),

    // System
    Halt,

    // Assembly Pseudo-Instructions
    Label(Label),                 // Label declaration
    Blank,                        // Empty line
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Stack
            AsmInst::Push(src) => write!(f, "push {}", src),
            AsmInst::Pop(dst) => write!(f, "pop {}", dst),

            // Data movement
            AsmInst::Copy(src, dst) => write!(f, "copy {}, {}", src, dst),

            // Arithmetic
            AsmInst::Add(src, dst) => write!(f, "add {}, {}", src, dst),
            AsmInst::Sub(src, dst) => write!(f, "sub {}, {}", src, dst),
            AsmInst::Inc(dst) => write!(f, "inc {}", dst),
            AsmInst::Dec(dst) => write!(f, "dec {}", dst),
            AsmInst::Shl(dst) => write!(f, "shl {}", dst),
            AsmInst::Clc => write!(f, "clc"),

            // Logical
            AsmInst::And(src, dst) => write!(f, "and {}, {}", src, dst),
            AsmInst::Or(src, dst) => write!(f, "or {}, {}", src, dst),
            AsmInst::Cmp(src, dst) => write!(f, "cmp {}, {}", src, dst),

            // Control Flow
            AsmInst::Jmp(label) => write!(f, "jmp {}", label),
            AsmInst::Jz(label) => write!(f, "jz {}", label),
            AsmInst::Jnz(label) => write!(f, "jnz {}", label),
            AsmInst::Jc(label) => write!(f, "jc {}", label),
            AsmInst::Jnc(label) => write!(f, "jnc {}", label),

            // System
            AsmInst::Halt => write!(f, "halt"),

            // Pseudo
            AsmInst::Label(label) => write!(f, "{}:", label),
            AsmInst::Blank => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_display() {
        assert_eq!(format!("{}", Reg::R0), "r0");
        assert_eq!(format!("{}", Reg::R3), "r3");
        assert_eq!(Reg::R2.index(), 2);
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(format!("{}", Operand::Imm(65535)), "65535");
        assert_eq!(format!("{}", Operand::Address("_x".to_string())), "_x");
        assert_eq!(format!("{}", Operand::Memory("_x".to_string())), "(_x)");
        assert_eq!(format!("{}", Operand::Indirect(Reg::R1)), "(r1)");
    }

    #[test]
    fn test_instruction_display() {
        let label = Label::new("_L000004".to_string());
        assert_eq!(format!("{}", AsmInst::Push(Operand::Imm(42))), "push 42");
        assert_eq!(format!("{}", AsmInst::Pop(Operand::Memory("_x".to_string()))), "pop (_x)");
        assert_eq!(format!("{}", AsmInst::Add(Reg::R1.into(), Reg::R0.into())), "add r1, r0");
        assert_eq!(
            format!("{}", AsmInst::Copy(Operand::Imm(0), Operand::Indirect(Reg::R0))),
            "copy 0, (r0)"
        );
        assert_eq!(format!("{}", AsmInst::Cmp(Reg::R0.into(), 0u16.into())), "cmp r0, 0");
        assert_eq!(format!("{}", AsmInst::Jnc(label.clone())), "jnc _L000004");
        assert_eq!(format!("{}", AsmInst::Label(label)), "_L000004:");
        assert_eq!(format!("{}", AsmInst::Halt), "halt");
        assert_eq!(format!("{}", AsmInst::Blank), "");
    }
}
