// In: src/config.rs

//! Configuration for the bridge's frame export and column merging.
//!
//! `BridgeConfig` can be built in code or deserialized from JSON. Every field
//! has a serde default, so a partial document (or `{}`) is valid. Operations
//! that take no config use `BridgeConfig::default()`.

use crate::error::TensorFrameError;
use serde::{Deserialize, Serialize};

//==================================================================================
// I. The Bridge Configuration
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BridgeConfig {
    /// If true, frame export drops columns of rank > 1 instead of spreading
    /// their cells over flat columns.
    #[serde(default)]
    pub skip_tensors: bool,

    /// Joins a column name and a cell index when spreading a tensor column,
    /// as in `Input_7`.
    #[serde(default = "default_cell_separator")]
    pub cell_separator: String,

    /// If true, table metadata is written to the frame schema metadata on
    /// export and read back on import.
    #[serde(default = "default_true")]
    pub carry_metadata: bool,

    /// If true, a merge run that goes past the last column is shortened to the
    /// columns that exist. Otherwise it fails with `InvalidArgument`.
    #[serde(default = "default_true")]
    pub clamp_merge_runs: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            skip_tensors: false,
            cell_separator: default_cell_separator(),
            carry_metadata: true,
            clamp_merge_runs: true,
        }
    }
}

impl BridgeConfig {
    /// Parses a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, TensorFrameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The frame column name for cell `i` of tensor column `name`.
    pub fn cell_column_name(&self, name: &str, i: usize) -> String {
        format!("{}{}{}", name, self.cell_separator, i)
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

fn default_cell_separator() -> String {
    "_".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let cfg = BridgeConfig::from_json("{}").unwrap();
        assert_eq!(cfg, BridgeConfig::default());
        assert_eq!(cfg.cell_column_name("Input", 3), "Input_3");
    }

    #[test]
    fn test_partial_document() {
        let cfg = BridgeConfig::from_json(r#"{"skip_tensors": true, "cell_separator": "."}"#).unwrap();
        assert!(cfg.skip_tensors);
        assert!(cfg.carry_metadata);
        assert_eq!(cfg.cell_column_name("Out", 0), "Out.0");
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            BridgeConfig::from_json("{\"skip_tensors\": 3}"),
            Err(TensorFrameError::SerdeJson(_))
        ));
    }
}
