use super::{Vm, VmState};
use crate::error::VmError;
use log::debug;
use vcc_codegen::{AsmInst, Label, Operand};

impl Vm {
    /// Execute one instruction; `at` is its index, `self.pc` already points past it
    pub(super) fn execute_instruction(&mut self, at: usize, inst: &AsmInst) -> Result<(), VmError> {
        match inst {
            AsmInst::Push(src) => {
                let value = self.read(src)?;
                self.push(at, value)?;
            }
            AsmInst::Pop(dst) => {
                let value = self.pop(at)?;
                self.write(at, dst, value)?;
            }
            AsmInst::Copy(src, dst) => {
                let value = self.read(src)?;
                self.write(at, dst, value)?;
            }

            AsmInst::Add(src, dst) => {
                let source = self.read(src)?;
                let current = self.read(dst)?;
                let sum = current as u32 + source as u32 + self.carry as u32;
                self.carry = sum > 0xFFFF;
                self.store_result(at, dst, sum as u16)?;
            }
            AsmInst::Sub(src, dst) => {
                let source = self.read(src)?;
                let current = self.read(dst)?;
                let difference = current as i32 - source as i32 - self.carry as i32;
                self.carry = difference < 0;
                self.store_result(at, dst, difference as u16)?;
            }
            AsmInst::Inc(dst) => {
                let current = self.read(dst)?;
                self.store_result(at, dst, current.wrapping_add(1))?;
            }
            AsmInst::Dec(dst) => {
                let current = self.read(dst)?;
                self.store_result(at, dst, current.wrapping_sub(1))?;
            }
            AsmInst::Shl(dst) => {
                let current = self.read(dst)?;
                self.carry = current & 0x8000 != 0;
                self.store_result(at, dst, current << 1)?;
            }
            AsmInst::Clc => self.carry = false,

            AsmInst::And(src, dst) => {
                let source = self.read(src)?;
                let current = self.read(dst)?;
                self.store_result(at, dst, current & source)?;
            }
            AsmInst::Or(src, dst) => {
                let source = self.read(src)?;
                let current = self.read(dst)?;
                self.store_result(at, dst, current | source)?;
            }
            AsmInst::Cmp(src, dst) => {
                let source = self.read(src)?;
                let current = self.read(dst)?;
                self.zero = current == source;
                self.carry = current <= source;
            }

            AsmInst::Jmp(label) => self.jump(label)?,
            AsmInst::Jz(label) => {
                if self.zero {
                    self.jump(label)?;
                }
            }
            AsmInst::Jnz(label) => {
                if !self.zero {
                    self.jump(label)?;
                }
            }
            AsmInst::Jc(label) => {
                if self.carry {
                    self.jump(label)?;
                }
            }
            AsmInst::Jnc(label) => {
                if !self.carry {
                    self.jump(label)?;
                }
            }

            AsmInst::Halt => {
                debug!("halt at instruction {} after {} steps", at, self.steps);
                self.state = VmState::Halted;
            }

            AsmInst::Label(_) | AsmInst::Blank => {}
        }
        Ok(())
    }

    /// Write an arithmetic result and set Z from it
    fn store_result(&mut self, at: usize, dst: &Operand, value: u16) -> Result<(), VmError> {
        self.zero = value == 0;
        self.write(at, dst, value)
    }

    fn read(&self, operand: &Operand) -> Result<u16, VmError> {
        Ok(match operand {
            Operand::Reg(reg) => self.registers[reg.index()],
            Operand::Imm(value) => *value,
            Operand::Address(name) => self.layout.resolve(name)?,
            Operand::Memory(name) => self.memory[self.layout.resolve(name)? as usize],
            Operand::Indirect(reg) => self.memory[self.registers[reg.index()] as usize],
        })
    }

    fn write(&mut self, at: usize, operand: &Operand, value: u16) -> Result<(), VmError> {
        match operand {
            Operand::Reg(reg) => self.registers[reg.index()] = value,
            Operand::Memory(name) => {
                let address = self.layout.resolve(name)?;
                self.memory[address as usize] = value;
            }
            Operand::Indirect(reg) => {
                let address = self.registers[reg.index()];
                self.memory[address as usize] = value;
            }
            Operand::Imm(_) | Operand::Address(_) => {
                return Err(VmError::InvalidDestination {
                    pc: at,
                    operand: operand.to_string(),
                });
            }
        }
        Ok(())
    }

    fn push(&mut self, at: usize, value: u16) -> Result<(), VmError> {
        let sp = self.sp.wrapping_sub(1);
        if sp >= self.layout.base() && (sp as u32) < self.layout.end() {
            return Err(VmError::StackOverflow { pc: at });
        }
        self.sp = sp;
        self.memory[sp as usize] = value;
        Ok(())
    }

    fn pop(&mut self, at: usize) -> Result<u16, VmError> {
        if self.stack_depth() == 0 {
            return Err(VmError::StackUnderflow { pc: at });
        }
        let value = self.memory[self.sp as usize];
        self.sp = self.sp.wrapping_add(1);
        Ok(value)
    }

    fn jump(&mut self, label: &Label) -> Result<(), VmError> {
        self.pc = self
            .labels
            .get(label.name())
            .copied()
            .ok_or_else(|| VmError::UndefinedLabel(label.name().to_string()))?;
        Ok(())
    }
}
