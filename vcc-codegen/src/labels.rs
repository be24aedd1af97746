//! Label allocation
//!
//! Every branch target in the generated program comes from a single
//! [`LabelAllocator`]. It only ever counts upward, so a label handed out once
//! is never handed out again for as long as the allocator lives; callers that
//! generate several fragments into one program must share the same allocator.

use log::trace;
use std::fmt;

/// A symbolic jump target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(name: String) -> Self {
        Label(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic label generator
#[derive(Debug)]
pub struct LabelAllocator {
    prefix: String,
    width: usize,
    next_label_id: u32,
}

impl LabelAllocator {
    pub const DEFAULT_PREFIX: &'static str = "_L";
    pub const DEFAULT_WIDTH: usize = 6;

    /// Create an allocator producing `_L000000`, `_L000001`, ...
    pub fn new() -> Self {
        Self::with_format(Self::DEFAULT_PREFIX, Self::DEFAULT_WIDTH)
    }

    /// Create an allocator with a custom prefix and zero-padding width
    pub fn with_format(prefix: &str, width: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            width,
            next_label_id: 0,
        }
    }

    /// Get the next label and advance the counter
    pub fn next_label(&mut self) -> Label {
        let id = self.next_label_id;
        self.next_label_id += 1;
        let label = Label(format!("{}{:0width$}", self.prefix, id, width = self.width));
        trace!("allocated label {}", label);
        label
    }

    /// Number of labels handed out so far
    pub fn allocated(&self) -> u32 {
        self.next_label_id
    }
}

impl Default for LabelAllocator {
    fn default() -> Self {
        Self::new()
    }
}
