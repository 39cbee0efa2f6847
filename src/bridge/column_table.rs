// In: src/bridge/column_table.rs

//! `ColumnTable`: the plain, ndarray-backed mirror of a tensor table.

use crate::bridge::dataset::TensorDataset;
use crate::bridge::DynArray;
use crate::config::BridgeConfig;
use crate::error::TensorFrameError;
use hashbrown::HashMap;
use std::fmt;

/// Ordered named columns plus a string metadata map.
///
/// Column names are unique and the name index is rebuilt whenever columns are
/// removed. Row count is taken from the first column added unless set up front
/// with [`ColumnTable::with_rows`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    cols: Vec<DynArray>,
    col_names: Vec<String>,
    rows: Option<usize>,
    col_name_map: HashMap<String, usize>,
    meta_data: HashMap<String, String>,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows: Some(rows),
            ..Self::default()
        }
    }

    /// Row count; zero for an empty table without an explicit count.
    pub fn rows(&self) -> usize {
        self.rows.unwrap_or(0)
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    /// Appends a column under a name not already in use.
    pub fn add_col(&mut self, name: &str, col: DynArray) -> Result<(), TensorFrameError> {
        if self.col_name_map.contains_key(name) {
            return Err(TensorFrameError::DuplicateColumn(name.to_string()));
        }
        if self.rows.is_none() {
            self.rows = Some(col.rows());
        }
        self.col_name_map.insert(name.to_string(), self.cols.len());
        self.col_names.push(name.to_string());
        self.cols.push(col);
        Ok(())
    }

    pub fn cols(&self) -> &[DynArray] {
        &self.cols
    }

    pub fn col(&self, i: usize) -> Option<&DynArray> {
        self.cols.get(i)
    }

    pub fn col_mut(&mut self, i: usize) -> Option<&mut DynArray> {
        self.cols.get_mut(i)
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    pub fn col_name(&self, i: usize) -> Option<&str> {
        self.col_names.get(i).map(String::as_str)
    }

    pub fn col_index(&self, name: &str) -> Result<usize, TensorFrameError> {
        self.col_name_map
            .get(name)
            .copied()
            .ok_or_else(|| TensorFrameError::MissingColumn(name.to_string()))
    }

    pub fn col_by_name(&self, name: &str) -> Result<&DynArray, TensorFrameError> {
        let i = self.col_index(name)?;
        Ok(&self.cols[i])
    }

    pub fn col_by_name_mut(&mut self, name: &str) -> Result<&mut DynArray, TensorFrameError> {
        let i = self.col_index(name)?;
        Ok(&mut self.cols[i])
    }

    /// Iterates `(name, column)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DynArray)> {
        self.col_names.iter().map(String::as_str).zip(self.cols.iter())
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

    /// Replaces the `n` columns starting at `start_name` with one column holding
    /// them stacked along the cell axis. Each part is seen as `(rows, cells)`,
    /// so a run of 1-D columns becomes a `(rows, n)` matrix.
    pub fn merge_columns(&mut self, start_name: &str, n: usize) -> Result<(), TensorFrameError> {
        self.merge_columns_with(start_name, n, &BridgeConfig::default())
    }

    /// [`ColumnTable::merge_columns`] with an explicit config. With
    /// `clamp_merge_runs` off, a run past the last column is an error.
    pub fn merge_columns_with(
        &mut self,
        start_name: &str,
        n: usize,
        config: &BridgeConfig,
    ) -> Result<(), TensorFrameError> {
        if n == 0 {
            return Err(TensorFrameError::InvalidArgument(
                "cannot merge a run of zero columns".to_string(),
            ));
        }
        let start = self.col_index(start_name)?;
        let available = self.cols.len() - start;
        let n = if n > available {
            if !config.clamp_merge_runs {
                return Err(TensorFrameError::InvalidArgument(format!(
                    "merge of {} columns from {} runs past the last column ({} available)",
                    n, start_name, available
                )));
            }
            log::warn!(
                "merge_columns: {} columns requested from {}, only {} available",
                n,
                start_name,
                available
            );
            available
        } else {
            n
        };

        let end = start + n;
        let merged = {
            let parts: Vec<&DynArray> = self.cols[start..end].iter().collect();
            DynArray::concat_cells(&parts)?
        };
        log::debug!(
            "merge_columns: {} columns into {} with shape {:?}",
            n,
            start_name,
            merged.shape()
        );

        self.cols[start] = merged;
        self.cols.drain(start + 1..end);
        self.col_names.drain(start + 1..end);
        self.rebuild_name_map();
        Ok(())
    }

    /// Replaces the named column with a copy laid out as `shape`. The element
    /// count must not change.
    pub fn reshape_column(&mut self, name: &str, shape: &[usize]) -> Result<(), TensorFrameError> {
        let i = self.col_index(name)?;
        let reshaped = self.cols[i].reshape(shape)?;
        self.cols[i] = reshaped;
        Ok(())
    }

    /// Moves every non-string column into a dataset, in column order.
    pub fn into_dataset(self) -> TensorDataset {
        TensorDataset::new(self.cols.into_iter().filter(|c| !c.is_string()).collect())
    }

    fn rebuild_name_map(&mut self) {
        self.col_name_map.clear();
        for (i, name) in self.col_names.iter().enumerate() {
            self.col_name_map.insert(name.clone(), i);
        }
    }
}

impl fmt::Display for ColumnTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {} Cols: {}", self.rows(), self.cols.len())?;
        for (name, col) in self.iter() {
            writeln!(f, "  {}: {} {:?}", name, col.data_type(), col.shape())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, ArrayD, IxDyn};

    fn spread_table() -> ColumnTable {
        let mut t = ColumnTable::new();
        t.add_col("Name", DynArray::from(array!["a".to_string(), "b".into()].into_dyn()))
            .unwrap();
        for i in 0..3 {
            let col = Array1::from(vec![i as f32, 10.0 + i as f32]).into_dyn();
            t.add_col(&format!("In_{}", i), DynArray::from(col)).unwrap();
        }
        t.add_col("Tail", DynArray::from(array![7i32, 8].into_dyn()))
            .unwrap();
        t
    }

    #[test]
    fn test_rows_adopted_from_first_column() {
        let t = spread_table();
        assert_eq!(t.rows(), 2);
        assert_eq!(ColumnTable::with_rows(5).rows(), 5);
        assert_eq!(ColumnTable::new().rows(), 0);
    }

    #[test]
    fn test_duplicate_and_missing_names() {
        let mut t = spread_table();
        let dup = t.add_col("Tail", DynArray::from(array![1u8, 2].into_dyn()));
        assert!(matches!(dup, Err(TensorFrameError::DuplicateColumn(_))));
        let err = t.col_by_name("Nope").unwrap_err();
        assert_eq!(err.to_string(), "column named: Nope not found");
    }

    #[test]
    fn test_merge_columns_stacks_and_reindexes() {
        let mut t = spread_table();
        t.merge_columns("In_0", 3).unwrap();

        assert_eq!(t.col_names(), &["Name", "In_0", "Tail"].map(String::from));
        assert_eq!(t.col_index("Tail").unwrap(), 2);
        assert!(t.col_index("In_1").is_err());

        let merged = t.col_by_name("In_0").unwrap();
        assert_eq!(merged.shape(), &[2, 3]);
        assert_eq!(
            merged.view::<f32>().unwrap().iter().copied().collect::<Vec<_>>(),
            vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]
        );
    }

    #[test]
    fn test_merge_columns_errors() {
        let mut t = spread_table();
        assert!(matches!(
            t.merge_columns("In_0", 0),
            Err(TensorFrameError::InvalidArgument(_))
        ));
        assert!(matches!(
            t.merge_columns("Missing", 2),
            Err(TensorFrameError::MissingColumn(_))
        ));
        assert!(matches!(
            t.merge_columns("In_2", 2),
            Err(TensorFrameError::TypeMismatch(_))
        ));
        assert_eq!(t.num_cols(), 5);
    }

    #[test]
    fn test_merge_run_past_end_is_clamped_or_rejected() {
        let mut t = spread_table();
        t.merge_columns("Tail", 4).unwrap();
        assert_eq!(t.col_by_name("Tail").unwrap().shape(), &[2, 1]);

        let strict = BridgeConfig {
            clamp_merge_runs: false,
            ..BridgeConfig::default()
        };
        let mut t = spread_table();
        assert!(matches!(
            t.merge_columns_with("In_1", 9, &strict),
            Err(TensorFrameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reshape_column() {
        let mut t = ColumnTable::new();
        t.add_col("X", DynArray::from(ArrayD::<u8>::zeros(IxDyn(&[3, 20]))))
            .unwrap();
        t.reshape_column("X", &[3, 4, 5]).unwrap();
        assert_eq!(t.col(0).unwrap().shape(), &[3, 4, 5]);
        assert!(matches!(
            t.reshape_column("X", &[3, 4, 4]),
            Err(TensorFrameError::Shape(_))
        ));
        assert!(matches!(
            t.reshape_column("Y", &[60]),
            Err(TensorFrameError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_display_summary() {
        let t = spread_table();
        let s = t.to_string();
        assert!(s.starts_with("Rows: 2 Cols: 5"));
        assert!(s.contains("Name: String [2]"));
    }
}
