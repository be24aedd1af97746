//! Error handling for the Vocal compiler
//!
//! Two kinds of failure exist during code generation:
//!
//! - Recoverable problems in the source program (type mismatches, narrowing
//!   stores). These are collected as [`Diagnostic`]s by an [`ErrorReporter`]
//!   and generation carries on so that one run reports as much as possible.
//! - Fatal conditions ([`CompilerError`]) that abort the whole run, such as an
//!   identifier the symbol table does not know about.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fatal compiler error; returning one of these stops code generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Unknown identifier '{name}' at {location}")]
    UnknownSymbol {
        name: String,
        location: SourceLocation,
    },

    #[error("Invalid program: {message}")]
    InvalidProgram { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
            notes: Vec::new(),
        }
    }

    /// Attach a follow-up line printed under the message
    pub fn add_note(&mut self, note: String) -> &mut Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Error reporter for collecting and displaying diagnostics
#[derive(Debug)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        let index = self.diagnostics.len();
        self.diagnostics.push(diagnostic);
        &mut self.diagnostics[index]
    }

    /// Report an error diagnostic
    pub fn error(&mut self, message: String, location: SourceLocation) -> &mut Diagnostic {
        self.error_count += 1;
        self.push(Diagnostic::error(message, location))
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, message: String, location: SourceLocation) -> &mut Diagnostic {
        self.warning_count += 1;
        self.push(Diagnostic::warning(message, location))
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerError {
    /// Create an unknown-symbol error
    pub fn unknown_symbol(name: &str, location: SourceLocation) -> Self {
        CompilerError::UnknownSymbol {
            name: name.to_string(),
            location,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: String) -> Self {
        CompilerError::ConfigError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Convert from serde_json::Error (malformed program or config input)
impl From<serde_json::Error> for CompilerError {
    fn from(err: serde_json::Error) -> Self {
        CompilerError::InvalidProgram {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let location = SourceLocation::new("test.voc", 3);

        let diag = Diagnostic::error("Test error".to_string(), location.clone());
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "Test error");
        assert_eq!(diag.location, location);
        assert_eq!(format!("{}", diag), "test.voc:3: error: Test error");
    }

    #[test]
    fn test_error_reporter() {
        let mut reporter = ErrorReporter::new();

        assert!(!reporter.has_errors());
        assert_eq!(reporter.error_count(), 0);

        reporter.warning("Narrowing".to_string(), SourceLocation::new_simple(1));
        assert!(!reporter.has_errors());

        reporter.error("Test error".to_string(), SourceLocation::new_simple(2));
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(reporter.diagnostics().len(), 2);
    }

    #[test]
    fn test_diagnostic_with_notes() {
        let mut reporter = ErrorReporter::new();
        reporter
            .warning("LONG expression assigned to INT x".to_string(), SourceLocation::new_simple(4))
            .add_note("Only lower word will be used".to_string());

        let diag = &reporter.diagnostics()[0];
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(
            format!("{}", diag),
            "<input>:4: warning: LONG expression assigned to INT x\n  note: Only lower word will be used"
        );
    }

    #[test]
    fn test_summary() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.summary(), "No errors or warnings");

        reporter.error("Error 1".to_string(), SourceLocation::dummy());
        assert_eq!(reporter.summary(), "1 error");

        reporter.error("Error 2".to_string(), SourceLocation::dummy());
        assert_eq!(reporter.summary(), "2 errors");

        reporter.warning("Warning 1".to_string(), SourceLocation::dummy());
        assert_eq!(reporter.summary(), "2 errors and 1 warning");
    }

    #[test]
    fn test_unknown_symbol_message() {
        let err = CompilerError::unknown_symbol("count", SourceLocation::new("loop.voc", 9));
        assert_eq!(err.to_string(), "Unknown identifier 'count' at loop.voc:9");
    }
}
