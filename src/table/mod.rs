// In: src/table/mod.rs

//! A minimal model of the host toolkit's named-column table: ordered tensor
//! columns that share a leading row dimension, a name index and a string
//! metadata map.

pub mod schema;

pub use schema::{ColumnSpec, Schema};

use crate::error::TensorFrameError;
use crate::tensor::Tensor;
use hashbrown::HashMap;

/// The row dimension name given to columns built from a [`Schema`].
pub const ROW_DIM_NAME: &str = "row";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    cols: Vec<Tensor>,
    col_names: Vec<String>,
    rows: usize,
    col_name_map: HashMap<String, usize>,
    meta_data: HashMap<String, String>,
}

impl Table {
    /// An empty table with zero rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table whose columns must all have `rows` rows.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Allocates a zero-filled column for every spec. Column shapes are
    /// `[rows] + cell_shape`, the first dimension named `"row"`.
    pub fn from_schema(schema: &[ColumnSpec], rows: usize) -> Result<Self, TensorFrameError> {
        let mut table = Self::with_rows(rows);
        for spec in schema {
            let mut dims = Vec::with_capacity(spec.cell_shape.len() + 1);
            dims.push(rows);
            dims.extend_from_slice(&spec.cell_shape);

            let names: Vec<&str> = if spec.dim_names.is_empty() {
                Vec::new()
            } else {
                std::iter::once(ROW_DIM_NAME)
                    .chain(spec.dim_names.iter().map(String::as_str))
                    .collect()
            };
            let col = Tensor::new(spec.data_type, &dims, &names)?;
            table.add_col(&spec.name, col)?;
        }
        Ok(table)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Appends a column. It must have rank >= 1, `rows` leading elements and a
    /// name not already in use.
    pub fn add_col(&mut self, name: &str, col: Tensor) -> Result<(), TensorFrameError> {
        if self.col_name_map.contains_key(name) {
            return Err(TensorFrameError::DuplicateColumn(name.to_string()));
        }
        match col.shape().dim(0) {
            Some(r) if r == self.rows => {}
            Some(r) => {
                return Err(TensorFrameError::ShapeMismatch(format!(
                    "column {} has {} rows, table has {}",
                    name, r, self.rows
                )))
            }
            None => {
                return Err(TensorFrameError::ShapeMismatch(format!(
                    "column {} is rank 0, table columns need a row dimension",
                    name
                )))
            }
        }
        self.col_name_map.insert(name.to_string(), self.cols.len());
        self.col_names.push(name.to_string());
        self.cols.push(col);
        Ok(())
    }

    pub fn cols(&self) -> &[Tensor] {
        &self.cols
    }

    pub fn col(&self, i: usize) -> Option<&Tensor> {
        self.cols.get(i)
    }

    pub fn col_mut(&mut self, i: usize) -> Option<&mut Tensor> {
        self.cols.get_mut(i)
    }

    pub fn col_name(&self, i: usize) -> Option<&str> {
        self.col_names.get(i).map(String::as_str)
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    pub fn col_index(&self, name: &str) -> Result<usize, TensorFrameError> {
        self.col_name_map
            .get(name)
            .copied()
            .ok_or_else(|| TensorFrameError::MissingColumn(name.to_string()))
    }

    pub fn col_by_name(&self, name: &str) -> Option<&Tensor> {
        self.col_name_map.get(name).map(|&i| &self.cols[i])
    }

    /// Like [`Table::col_by_name`], failing with `MissingColumn`.
    pub fn col_by_name_try(&self, name: &str) -> Result<&Tensor, TensorFrameError> {
        self.col_by_name(name)
            .ok_or_else(|| TensorFrameError::MissingColumn(name.to_string()))
    }

    pub fn col_by_name_mut(&mut self, name: &str) -> Option<&mut Tensor> {
        match self.col_name_map.get(name) {
            Some(&i) => self.cols.get_mut(i),
            None => None,
        }
    }

    pub fn set_meta_data(&mut self, key: &str, value: &str) {
        self.meta_data.insert(key.to_string(), value.to_string());
    }

    pub fn meta_data(&self, key: &str) -> Option<&str> {
        self.meta_data.get(key).map(String::as_str)
    }

    pub fn meta_data_map(&self) -> &HashMap<String, String> {
        &self.meta_data
    }
}
