/// VM module - simulator for the VuPP stack machine

mod execution;
mod layout;
mod state;

pub use layout::{DataLayout, Placement};
pub use state::VmState;

use crate::assembler::assemble;
use crate::config::VmConfig;
use crate::constants::*;
use crate::error::VmError;
use log::debug;
use std::collections::HashMap;
use vcc_codegen::AsmInst;
use vcc_common::{SymbolTable, ValueKind};

/// The VuPP Virtual Machine
pub struct Vm {
    // Program and resolved label positions
    program: Vec<AsmInst>,
    labels: HashMap<String, usize>,

    // Data memory; the stack grows down from the top
    pub memory: Vec<u16>,
    pub registers: [u16; REGISTER_COUNT],
    pub sp: u16,
    pub pc: usize,

    // Flags
    pub carry: bool,
    pub zero: bool,

    pub state: VmState,
    layout: DataLayout,
    steps: u64,
}

impl Vm {
    /// Load a parsed program; every jump target must be declared exactly once
    pub fn new(program: Vec<AsmInst>, layout: DataLayout) -> Result<Self, VmError> {
        let mut labels = HashMap::new();
        for (index, inst) in program.iter().enumerate() {
            if let AsmInst::Label(label) = inst {
                if labels.insert(label.name().to_string(), index).is_some() {
                    return Err(VmError::DuplicateLabel(label.name().to_string()));
                }
            }
        }

        for inst in &program {
            let target = match inst {
                AsmInst::Jmp(label)
                | AsmInst::Jz(label)
                | AsmInst::Jnz(label)
                | AsmInst::Jc(label)
                | AsmInst::Jnc(label) => label,
                _ => continue,
            };
            if !labels.contains_key(target.name()) {
                return Err(VmError::UndefinedLabel(target.name().to_string()));
            }
        }

        debug!("loaded {} instructions, {} labels", program.len(), labels.len());

        Ok(Vm {
            program,
            labels,
            memory: vec![0; MEMORY_WORDS],
            registers: [0; REGISTER_COUNT],
            sp: STACK_BASE,
            pc: 0,
            carry: false,
            zero: false,
            state: VmState::Ready,
            layout,
            steps: 0,
        })
    }

    /// Assemble `source` and lay out storage for `symbols`
    pub fn from_source(source: &str, symbols: &SymbolTable, config: &VmConfig) -> Result<Self, VmError> {
        let program = assemble(source)?;
        let layout = DataLayout::new(symbols, &config.symbol_prefix, config.data_base)?;
        Self::new(program, layout)
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), VmError> {
        match self.state {
            VmState::Ready => self.state = VmState::Running,
            VmState::Running => {}
            _ => return Ok(()),
        }

        let at = self.pc;
        let Some(inst) = self.program.get(at).cloned() else {
            debug!("ran off the end of the program after {} steps", self.steps);
            self.state = VmState::Finished;
            return Ok(());
        };

        self.pc = at + 1;
        self.steps += 1;
        if let Err(e) = self.execute_instruction(at, &inst) {
            self.state = VmState::Error(e.to_string());
            return Err(e);
        }
        Ok(())
    }

    /// Run until the program stops or `max_steps` instructions have executed
    pub fn run(&mut self, max_steps: u64) -> Result<(), VmError> {
        while !self.state.is_stopped() {
            if self.steps >= max_steps {
                self.state = VmState::Error(format!("step limit {} exceeded", max_steps));
                return Err(VmError::StepLimit(max_steps));
            }
            self.step()?;
        }
        Ok(())
    }

    /// Instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Words currently on the stack
    pub fn stack_depth(&self) -> usize {
        (MEMORY_WORDS - self.sp as usize + STACK_BASE as usize) % MEMORY_WORDS
    }

    /// Stack contents, top first
    pub fn stack(&self) -> Vec<u16> {
        (0..self.stack_depth())
            .map(|offset| self.memory[(self.sp as usize + offset) % MEMORY_WORDS])
            .collect()
    }

    /// Registers, stack pointer, program counter and flags on one line
    pub fn register_summary(&self) -> String {
        let registers = self
            .registers
            .iter()
            .enumerate()
            .map(|(index, value)| format!("r{} = {:04X}", index, value))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}, sp = {:04X}, pc = {}, ZF = {}, CF = {}",
            registers, self.sp, self.pc, self.zero as u8, self.carry as u8
        )
    }

    /// The value of `kind` on top of the stack, if there is one
    pub fn top_value(&self, kind: ValueKind) -> Option<u32> {
        let stack = self.stack();
        match kind {
            ValueKind::Int16 => stack.first().map(|&low| low as u32),
            ValueKind::Int32 => match stack.as_slice() {
                [low, high, ..] => Some(((*high as u32) << 16) | *low as u32),
                _ => None,
            },
            ValueKind::Error => None,
        }
    }

    fn element_address(&self, name: &str, index: u16) -> Result<(usize, ValueKind), VmError> {
        let placement = self.layout.placement(name)?;
        let kind = placement.attrs.kind.element_kind();
        let count = if placement.attrs.kind.is_array() { placement.attrs.element_count } else { 1 };
        if index >= count {
            return Err(VmError::IndexOutOfRange { name: name.to_string(), index });
        }
        let offset = index as usize * kind.size_in_words() as usize;
        Ok((placement.address as usize + offset, kind))
    }

    /// Read a scalar or array element, widened to 32 bits
    pub fn read_element(&self, name: &str, index: u16) -> Result<u32, VmError> {
        let (address, kind) = self.element_address(name, index)?;
        let low = self.memory[address] as u32;
        Ok(match kind {
            ValueKind::Int32 => ((self.memory[(address + 1) % MEMORY_WORDS] as u32) << 16) | low,
            _ => low,
        })
    }

    /// Write a scalar or array element; INT storage keeps the low word
    pub fn write_element(&mut self, name: &str, index: u16, value: u32) -> Result<(), VmError> {
        let (address, kind) = self.element_address(name, index)?;
        self.memory[address] = value as u16;
        if kind == ValueKind::Int32 {
            self.memory[(address + 1) % MEMORY_WORDS] = (value >> 16) as u16;
        }
        Ok(())
    }

    /// Read a scalar variable
    pub fn read_var(&self, name: &str) -> Result<u32, VmError> {
        self.read_element(name, 0)
    }

    /// Write a scalar variable
    pub fn write_var(&mut self, name: &str, value: u32) -> Result<(), VmError> {
        self.write_element(name, 0, value)
    }
}
