//! Data section layout
//!
//! Variables get consecutive storage from the data base in name order.
//! An INT takes one word, a LONG two (low word first), and arrays take
//! `element_count` times their element size.

use crate::constants::MEMORY_WORDS;
use crate::error::VmError;
use log::debug;
use std::collections::HashMap;
use vcc_common::{SymbolAttrs, SymbolTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub address: u16,
    pub attrs: SymbolAttrs,
}

#[derive(Debug, Clone, Default)]
pub struct DataLayout {
    prefix: String,
    base: u16,
    end: u32,
    placements: HashMap<String, Placement>,
}

impl DataLayout {
    pub fn new(symbols: &SymbolTable, prefix: &str, base: u16) -> Result<Self, VmError> {
        let mut placements = HashMap::new();
        let mut next = base as u32;
        for (name, attrs) in symbols.iter() {
            placements.insert(
                name.to_string(),
                Placement { address: next as u16, attrs: *attrs },
            );
            next += attrs.size_in_words();
            if next > MEMORY_WORDS as u32 {
                return Err(VmError::DataOverflow {
                    needed: next - base as u32,
                    available: MEMORY_WORDS as u32 - base as u32,
                });
            }
        }
        debug!("data section: {} symbols in {:#06x}..{:#06x}", placements.len(), base, next);

        Ok(Self {
            prefix: prefix.to_string(),
            base,
            end: next,
            placements,
        })
    }

    /// Placement of a variable by its source name
    pub fn placement(&self, name: &str) -> Result<Placement, VmError> {
        self.placements
            .get(name)
            .copied()
            .ok_or_else(|| VmError::UnknownSymbol(name.to_string()))
    }

    /// Resolve a decorated operand name such as `_count` to its address
    pub fn resolve(&self, operand: &str) -> Result<u16, VmError> {
        let name = operand
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| VmError::UnknownSymbol(operand.to_string()))?;
        Ok(self.placement(name)?.address)
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    /// One past the last word of the data section
    pub fn end(&self) -> u32 {
        self.end
    }
}
