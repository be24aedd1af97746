//! Source location tracking for error reporting
//!
//! The Vocal front end attaches a line number to every node it builds. This
//! module pairs that line with the name of the file being compiled so that
//! diagnostics can be tagged the way users expect (`prog.voc:12`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line in a source file (1-based; 0 means unknown)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
        }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0)
    }
}

// Allow creating location with just a line (common pattern in tests)
impl SourceLocation {
    pub fn new_simple(line: u32) -> Self {
        Self {
            filename: "<input>".to_string(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}
