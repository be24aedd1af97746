//! Assembly text reader
//!
//! Reads the textual form produced by the Vocal compiler back into
//! [`AsmInst`] values. One instruction or label per line; `;` starts a
//! comment. Operands follow the `op src, dst` order of the emitter.

use crate::error::VmError;
use vcc_codegen::{AsmInst, Label, Operand, Reg};

/// Parse a whole assembly listing
pub fn assemble(source: &str) -> Result<Vec<AsmInst>, VmError> {
    let mut program = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = match raw.find(';') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();

        if text.is_empty() {
            continue;
        }
        program.push(parse_line(text).map_err(|message| VmError::Parse { line, message })?);
    }
    Ok(program)
}

fn parse_line(text: &str) -> Result<AsmInst, String> {
    if let Some(name) = text.strip_suffix(':') {
        let name = name.trim();
        if !is_identifier(name) {
            return Err(format!("Invalid label name '{}'", name));
        }
        return Ok(AsmInst::Label(Label::new(name.to_string())));
    }

    let (mnemonic, rest) = match text.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim()),
        None => (text, ""),
    };
    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };

    let expect = |count: usize| -> Result<(), String> {
        if operands.len() == count {
            Ok(())
        } else {
            Err(format!(
                "'{}' takes {} operand{}, found {}",
                mnemonic,
                count,
                if count == 1 { "" } else { "s" },
                operands.len()
            ))
        }
    };

    let mnemonic_lower = mnemonic.to_ascii_lowercase();
    let inst = match mnemonic_lower.as_str() {
        "push" | "pop" | "inc" | "dec" | "shl" => {
            expect(1)?;
            let operand = parse_operand(operands[0])?;
            match mnemonic_lower.as_str() {
                "push" => AsmInst::Push(operand),
                "pop" => AsmInst::Pop(operand),
                "inc" => AsmInst::Inc(operand),
                "dec" => AsmInst::Dec(operand),
                _ => AsmInst::Shl(operand),
            }
        }
        "copy" | "add" | "sub" | "and" | "or" | "cmp" => {
            expect(2)?;
            let src = parse_operand(operands[0])?;
            let dst = parse_operand(operands[1])?;
            match mnemonic_lower.as_str() {
                "copy" => AsmInst::Copy(src, dst),
                "add" => AsmInst::Add(src, dst),
                "sub" => AsmInst::Sub(src, dst),
                "and" => AsmInst::And(src, dst),
                "or" => AsmInst::Or(src, dst),
                _ => AsmInst::Cmp(src, dst),
            }
        }
        "jmp" | "jz" | "jnz" | "jc" | "jnc" => {
            expect(1)?;
            if !is_identifier(operands[0]) {
                return Err(format!("Invalid jump target '{}'", operands[0]));
            }
            let target = Label::new(operands[0].to_string());
            match mnemonic_lower.as_str() {
                "jmp" => AsmInst::Jmp(target),
                "jz" => AsmInst::Jz(target),
                "jnz" => AsmInst::Jnz(target),
                "jc" => AsmInst::Jc(target),
                _ => AsmInst::Jnc(target),
            }
        }
        "clc" => {
            expect(0)?;
            AsmInst::Clc
        }
        "halt" => {
            expect(0)?;
            AsmInst::Halt
        }
        _ => return Err(format!("Unknown mnemonic '{}'", mnemonic)),
    };
    Ok(inst)
}

fn parse_register(text: &str) -> Option<Reg> {
    match text {
        "r0" => Some(Reg::R0),
        "r1" => Some(Reg::R1),
        "r2" => Some(Reg::R2),
        "r3" => Some(Reg::R3),
        _ => None,
    }
}

fn parse_operand(text: &str) -> Result<Operand, String> {
    if let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        let inner = inner.trim();
        if let Some(reg) = parse_register(inner) {
            return Ok(Operand::Indirect(reg));
        }
        if is_identifier(inner) {
            return Ok(Operand::Memory(inner.to_string()));
        }
        return Err(format!("Invalid memory operand '{}'", text));
    }

    if let Some(reg) = parse_register(text) {
        return Ok(Operand::Reg(reg));
    }
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        return text
            .parse::<u16>()
            .map(Operand::Imm)
            .map_err(|_| format!("Immediate '{}' is not a 16-bit value", text));
    }
    if is_identifier(text) {
        return Ok(Operand::Address(text.to_string()));
    }
    Err(format!("Invalid operand '{}'", text))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
