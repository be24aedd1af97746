use crate::constants::{DEFAULT_DATA_BASE, DEFAULT_MAX_STEPS, DEFAULT_SYMBOL_PREFIX};
use crate::error::VmError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulator settings, loadable from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// Instructions executed before the run is abandoned
    pub max_steps: u64,
    /// First word of the data section
    pub data_base: u16,
    /// Marker the assembly uses in front of variable names
    pub symbol_prefix: String,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            data_base: DEFAULT_DATA_BASE,
            symbol_prefix: DEFAULT_SYMBOL_PREFIX.to_string(),
        }
    }
}

impl VmConfig {
    pub fn load(path: &Path) -> Result<Self, VmError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: VmConfig = serde_json::from_str(r#"{ "max_steps": 50 }"#).unwrap();
        assert_eq!(config.max_steps, 50);
        assert_eq!(config.data_base, DEFAULT_DATA_BASE);
        assert_eq!(config.symbol_prefix, "_");
    }
}
