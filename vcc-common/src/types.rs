//! Common types used throughout the compiler
//!
//! This module defines the value and symbol classifications shared by the
//! code generator and the VuPP simulator, together with the read-only symbol
//! table the front end hands to code generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of value an expression leaves on the evaluation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    /// One 16-bit word (the native machine size)
    Int16,
    /// Two 16-bit words, high word deeper on the stack
    Int32,
    /// Generation failed and was already reported; nothing is on the stack
    Error,
}

impl ValueKind {
    /// Number of stack words occupied by a value of this kind
    pub fn size_in_words(&self) -> u16 {
        match self {
            ValueKind::Int16 => 1,
            ValueKind::Int32 => 2,
            ValueKind::Error => 0,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValueKind::Error)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int16 => write!(f, "INT"),
            ValueKind::Int32 => write!(f, "LONG"),
            ValueKind::Error => write!(f, "<error>"),
        }
    }
}

/// Declared kind of a named variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolKind {
    Scalar16,
    Scalar32,
    Array16,
    Array32,
}

impl SymbolKind {
    /// Kind of the value produced by reading one element (or the scalar itself)
    pub fn element_kind(&self) -> ValueKind {
        match self {
            SymbolKind::Scalar16 | SymbolKind::Array16 => ValueKind::Int16,
            SymbolKind::Scalar32 | SymbolKind::Array32 => ValueKind::Int32,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SymbolKind::Array16 | SymbolKind::Array32)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Scalar16 => write!(f, "INT"),
            SymbolKind::Scalar32 => write!(f, "LONG"),
            SymbolKind::Array16 => write!(f, "INTARRAY"),
            SymbolKind::Array32 => write!(f, "LONGARRAY"),
        }
    }
}

fn default_element_count() -> u16 {
    1
}

/// Symbol table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolAttrs {
    pub kind: SymbolKind,
    #[serde(default = "default_element_count")]
    pub element_count: u16,
}

impl SymbolAttrs {
    pub fn scalar(kind: SymbolKind) -> Self {
        Self { kind, element_count: 1 }
    }

    pub fn array(kind: SymbolKind, element_count: u16) -> Self {
        Self { kind, element_count }
    }

    /// Get the storage size of this symbol in 16-bit words
    pub fn size_in_words(&self) -> u32 {
        let element_words = self.kind.element_kind().size_in_words() as u32;
        if self.kind.is_array() {
            element_words * self.element_count as u32
        } else {
            element_words
        }
    }
}

/// Mapping from identifier to its declared attributes
///
/// Populated by the front end; code generation only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: BTreeMap<String, SymbolAttrs>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    /// Declare a symbol, replacing any previous declaration of the same name
    pub fn declare(&mut self, name: &str, attrs: SymbolAttrs) {
        self.symbols.insert(name.to_string(), attrs);
    }

    /// Builder-style declaration, handy when setting up tables in tests
    pub fn with_symbol(mut self, name: &str, attrs: SymbolAttrs) -> Self {
        self.declare(name, attrs);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolAttrs> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate symbols in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolAttrs)> {
        self.symbols.iter().map(|(name, attrs)| (name.as_str(), attrs))
    }
}
