// In: src/bridge/dataset.rs

//! Dataset export: the numeric columns of a table as an ordered tensor sequence.

use crate::bridge::{ColumnTable, DynArray};

/// An ordered sequence of arrays, one per non-string column of the source
/// table. Leading dimensions are not checked against each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TensorDataset {
    tensors: Vec<DynArray>,
}

impl TensorDataset {
    pub fn new(tensors: Vec<DynArray>) -> Self {
        Self { tensors }
    }

    pub fn tensors(&self) -> &[DynArray] {
        &self.tensors
    }

    pub fn into_tensors(self) -> Vec<DynArray> {
        self.tensors
    }

    pub fn num_tensors(&self) -> usize {
        self.tensors.len()
    }

    /// Number of samples: the leading dimension of the first tensor.
    pub fn len(&self) -> usize {
        self.tensors.first().map(DynArray::rows).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample `row`: every tensor indexed at `row` along its leading axis.
    /// `None` if any tensor is too short or has no leading axis.
    pub fn item(&self, row: usize) -> Option<Vec<DynArray>> {
        self.tensors.iter().map(|t| t.index_axis0(row)).collect()
    }
}

/// Copies every non-string column of `value` into a dataset, in column order.
pub fn value_to_dataset(value: &ColumnTable) -> TensorDataset {
    let (dataset, _labels) = value_to_labeled_dataset(value);
    dataset
}

/// Like [`value_to_dataset`], also returning the string columns (in column
/// order) as labels.
pub fn value_to_labeled_dataset(value: &ColumnTable) -> (TensorDataset, Vec<DynArray>) {
    let (labels, tensors): (Vec<DynArray>, Vec<DynArray>) =
        value.cols().iter().cloned().partition(DynArray::is_string);
    log::debug!(
        "value_to_dataset: {} tensors, {} string columns set aside",
        tensors.len(),
        labels.len()
    );
    (TensorDataset::new(tensors), labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn mixed_table() -> ColumnTable {
        let mut t = ColumnTable::new();
        t.add_col("a", DynArray::from(array![[1.0f32, 2.0], [3.0, 4.0]].into_dyn()))
            .unwrap();
        t.add_col("name", DynArray::from(array!["x".to_string(), "y".into()].into_dyn()))
            .unwrap();
        t.add_col("b", DynArray::from(array![5.0f32, 6.0].into_dyn()))
            .unwrap();
        t
    }

    #[test]
    fn test_string_columns_are_dropped_in_order() {
        let t = mixed_table();
        let ds = value_to_dataset(&t);
        assert_eq!(ds.num_tensors(), 2);
        assert_eq!(ds.tensors()[0], *t.col(0).unwrap());
        assert_eq!(ds.tensors()[1], *t.col(2).unwrap());
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_labeled_dataset_keeps_strings_aside() {
        let (ds, labels) = value_to_labeled_dataset(&mixed_table());
        assert_eq!(ds.num_tensors(), 2);
        assert_eq!(labels.len(), 1);
        assert!(labels[0].is_string());
    }

    #[test]
    fn test_into_dataset_moves_columns() {
        let ds = mixed_table().into_dataset();
        assert_eq!(ds, value_to_dataset(&mixed_table()));
    }

    #[test]
    fn test_item_slices_every_tensor() {
        let ds = value_to_dataset(&mixed_table());
        let item = ds.item(1).unwrap();
        assert_eq!(item[0], DynArray::from(array![3.0f32, 4.0].into_dyn()));
        assert_eq!(item[1].ndim(), 0);
        assert!(ds.item(2).is_none());
        assert!(TensorDataset::default().is_empty());
    }
}
