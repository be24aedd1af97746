//! Instruction sink and assembly text emission
//!
//! Generated instructions are appended to an [`InstructionSink`] in program
//! order. Nothing is ever removed or reordered once appended.

use crate::asm::AsmInst;
use crate::labels::Label;

/// Append-only buffer of generated instructions
#[derive(Debug, Default)]
pub struct InstructionSink {
    instructions: Vec<AsmInst>,
}

impl InstructionSink {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, inst: AsmInst) {
        self.instructions.push(inst);
    }

    pub fn extend<I: IntoIterator<Item = AsmInst>>(&mut self, insts: I) {
        self.instructions.extend(insts);
    }

    /// Declare `label` at the current position
    pub fn label(&mut self, label: &Label) {
        self.instructions.push(AsmInst::Label(label.clone()));
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[AsmInst] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<AsmInst> {
        self.instructions
    }

    /// Labels declared so far, in declaration order
    pub fn declared_labels(&self) -> Vec<&Label> {
        self.instructions
            .iter()
            .filter_map(|inst| match inst {
                AsmInst::Label(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    /// Render the buffered program as assembly text
    pub fn render(&self) -> String {
        emit_instructions(&self.instructions)
    }
}

/// Format instructions one per line: labels flush left, instructions indented
pub fn emit_instructions(instructions: &[AsmInst]) -> String {
    let mut output = String::new();
    for inst in instructions {
        match inst {
            AsmInst::Label(_) | AsmInst::Blank => output.push_str(&format!("{}\n", inst)),
            _ => output.push_str(&format!("    {}\n", inst)),
        }
    }
    output
}
