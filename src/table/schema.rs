use crate::types::DataType;
use serde::{Deserialize, Serialize};

/// Declares one column of a [`super::Table`]: its name, element type, and the
/// shape of a single row's cell (empty for scalar columns).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub cell_shape: Vec<usize>,
    /// Names of the cell dimensions. Empty, or one per `cell_shape` entry.
    #[serde(default)]
    pub dim_names: Vec<String>,
}

impl ColumnSpec {
    /// A scalar (one value per row) column.
    pub fn scalar(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            cell_shape: Vec::new(),
            dim_names: Vec::new(),
        }
    }

    /// A tensor column whose rows each hold a `cell_shape` cell.
    pub fn tensor(name: &str, data_type: DataType, cell_shape: &[usize], dim_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            cell_shape: cell_shape.to_vec(),
            dim_names: dim_names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Elements per row, or `None` if the count overflows `usize`.
    pub fn cell_size(&self) -> Option<usize> {
        self.cell_shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }
}

/// An ordered list of column declarations.
pub type Schema = Vec<ColumnSpec>;
