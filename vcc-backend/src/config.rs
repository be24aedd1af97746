//! Code generation settings
//!
//! Defaults reproduce the classic output format (`_L000000` labels and `_x`
//! memory operands). A JSON file may override any subset of the fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use vcc_codegen::LabelAllocator;
use vcc_common::CompilerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Prefix of every generated jump target
    pub label_prefix: String,
    /// Minimum number of digits in a label, zero padded
    pub label_width: usize,
    /// Marker prepended to variable names in memory operands
    pub symbol_prefix: String,
    /// Emit a zero-divisor check ahead of the division loop
    pub guard_division_by_zero: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            label_prefix: LabelAllocator::DEFAULT_PREFIX.to_string(),
            label_width: LabelAllocator::DEFAULT_WIDTH,
            symbol_prefix: "_".to_string(),
            guard_division_by_zero: true,
        }
    }
}

impl CodegenConfig {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(source: &str) -> Result<Self, CompilerError> {
        let config: CodegenConfig = serde_json::from_str(source)
            .map_err(|e| CompilerError::config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Reject settings that would produce unreadable or ambiguous output
    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.label_prefix.is_empty() {
            return Err(CompilerError::config_error(
                "label_prefix must not be empty".to_string(),
            ));
        }
        if self.symbol_prefix == self.label_prefix {
            return Err(CompilerError::config_error(format!(
                "symbol_prefix and label_prefix are both '{}'; labels could collide with variables",
                self.symbol_prefix
            )));
        }
        Ok(())
    }

    /// True when `name` has the shape of a label this configuration generates
    pub fn is_label_name(&self, name: &str) -> bool {
        match name.strip_prefix(self.label_prefix.as_str()) {
            Some(digits) => {
                !digits.is_empty()
                    && digits.len() >= self.label_width
                    && digits.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        }
    }

    /// A label allocator producing labels in the configured format
    pub fn label_allocator(&self) -> LabelAllocator {
        LabelAllocator::with_format(&self.label_prefix, self.label_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodegenConfig::default();
        assert_eq!(config.label_prefix, "_L");
        assert_eq!(config.label_width, 6);
        assert_eq!(config.symbol_prefix, "_");
        assert!(config.guard_division_by_zero);
        assert_eq!(config.label_allocator().next_label().name(), "_L000000");
    }

    #[test]
    fn test_partial_override() {
        let config = CodegenConfig::from_json(r#"{ "guard_division_by_zero": false, "label_width": 3 }"#)
            .unwrap();
        assert!(!config.guard_division_by_zero);
        assert_eq!(config.label_width, 3);
        assert_eq!(config.symbol_prefix, "_");
        assert_eq!(config.label_allocator().next_label().name(), "_L000");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            CodegenConfig::from_json(r#"{ "label_prefix": "" }"#),
            Err(CompilerError::ConfigError { .. })
        ));
        assert!(matches!(
            CodegenConfig::from_json(r#"{ "label_prefix": "v", "symbol_prefix": "v" }"#),
            Err(CompilerError::ConfigError { .. })
        ));
        assert!(matches!(
            CodegenConfig::from_json(r#"{ "label_width": "wide" }"#),
            Err(CompilerError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_label_name_shape() {
        let config = CodegenConfig::default();
        assert!(config.is_label_name("_L000000"));
        assert!(config.is_label_name("_L1234567"));
        assert!(!config.is_label_name("_L12"));
        assert!(!config.is_label_name("_L"));
        assert!(!config.is_label_name("_Loop00"));
        assert!(!config.is_label_name("_x"));
    }
}
