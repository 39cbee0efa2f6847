// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` converts the tensor-table model (`tensor::Tensor`, `table::Table`)
// to and from the representations data tooling consumes: `ndarray` arrays, a
// plain column table, Arrow record batches and tensor datasets.
//
// Conversion Layers:
//
//   1. [Registry (registry.rs)]       -> One handler per supported `DataType`
//         |                              (to/from array, copy in/out)
//         `-> looked up by ->
//
//   2. [Array Bridge (array.rs)]      -> `Tensor` <-> `DynArray`
//         |
//         `-> applied per column by ->
//
//   3. [Table Bridge (table.rs)]      -> `Table` <-> `ColumnTable` (by position,
//         |                              or copy by name with silent skips)
//         |
//         `-> whose `ColumnTable` feeds ->
//
//   4a. [Frame Bridge (frame.rs)]     -> `ColumnTable` <-> `RecordBatch`
//         |                              (tensor columns spread into cells;
//         |                               merge_columns/reshape_column undo it)
//   4b. [Dataset Export (dataset.rs)] -> `ColumnTable` -> `TensorDataset`
//                                        (string columns dropped or set aside)
//
// Every entry point without a `_with` suffix uses `BridgeConfig::default()`.
//
// ====================================================================================
pub mod array;
pub mod column_table;
pub mod dataset;
pub mod dyn_array;
pub mod frame;
pub mod registry;
pub mod table;

pub use array::{copy_into_generic, copy_into_typed, from_generic, to_generic};
pub use column_table::ColumnTable;
pub use dataset::{value_to_dataset, value_to_labeled_dataset, TensorDataset};
pub use dyn_array::DynArray;
pub use frame::{frame_to_value, frame_to_value_with, value_to_frame, value_to_frame_with};
pub use registry::{handler_for, ElementHandler};
pub use table::{copy_table_into_value, copy_value_into_table, table_to_value, value_to_table};
