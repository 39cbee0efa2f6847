// In: src/bridge/frame.rs

//! `ColumnTable` <-> Arrow `RecordBatch` conversion.
//!
//! A frame only holds flat columns. On export, a column of rank > 1 is spread
//! over `cell_size` columns named `<name><sep><i>`; each holds cell element
//! `i` of every row. Import copies every frame column back as a 1-D column and
//! does not re-merge: callers run `merge_columns` and `reshape_column` with
//! the cell count and shape they know.

use crate::bridge::{ColumnTable, DynArray};
use crate::config::BridgeConfig;
use crate::error::TensorFrameError;
use crate::types::DataType;
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{
    DataType as ArrowDataType, Field, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, Schema, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use hashbrown::HashSet;
use ndarray::Array1;
use std::sync::Arc;

//==================================================================================
// I. Export
//==================================================================================

/// Exports `value` as a frame with the default config.
pub fn value_to_frame(value: &ColumnTable) -> Result<RecordBatch, TensorFrameError> {
    value_to_frame_with(value, &BridgeConfig::default())
}

pub fn value_to_frame_with(
    value: &ColumnTable,
    config: &BridgeConfig,
) -> Result<RecordBatch, TensorFrameError> {
    let mut fields = Vec::with_capacity(value.num_cols());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(value.num_cols());
    // Generated cell names can land on an existing column name.
    let mut seen: HashSet<String> = HashSet::new();
    let mut claim = |field_name: String| -> Result<String, TensorFrameError> {
        if !seen.insert(field_name.clone()) {
            return Err(TensorFrameError::DuplicateColumn(field_name));
        }
        Ok(field_name)
    };

    for (name, col) in value.iter() {
        let arrow_type = col.data_type().to_arrow_type()?;
        if col.ndim() <= 1 {
            fields.push(Field::new(claim(name.to_string())?, arrow_type, false));
            columns.push(to_arrow_column(col));
            continue;
        }
        if config.skip_tensors {
            log::debug!("value_to_frame: skipping tensor column {} {:?}", name, col.shape());
            continue;
        }
        let cells = col.split_cells()?;
        log::debug!(
            "value_to_frame: spreading {} {:?} over {} columns",
            name,
            col.shape(),
            cells.len()
        );
        for (i, cell) in cells.iter().enumerate() {
            fields.push(Field::new(
                claim(config.cell_column_name(name, i))?,
                arrow_type.clone(),
                false,
            ));
            columns.push(to_arrow_column(cell));
        }
    }

    let mut schema = Schema::new(fields);
    if config.carry_metadata {
        schema = schema.with_metadata(
            value
                .meta_data_map()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );
    }
    let options = RecordBatchOptions::new().with_row_count(Some(value.rows()));
    let batch = RecordBatch::try_new_with_options(Arc::new(schema), columns, &options)?;
    log_metric!("event" = "value_to_frame", "columns" = batch.num_columns(), "rows" = batch.num_rows());
    Ok(batch)
}

/// Flattens `col` in row-major order into an Arrow array of the mapped type.
fn to_arrow_column(col: &DynArray) -> ArrayRef {
    match col {
        DynArray::UInt8(a) => Arc::new(UInt8Array::from_iter_values(a.iter().copied())),
        DynArray::Int8(a) => Arc::new(Int8Array::from_iter_values(a.iter().copied())),
        DynArray::UInt16(a) => Arc::new(UInt16Array::from_iter_values(a.iter().copied())),
        DynArray::Int16(a) => Arc::new(Int16Array::from_iter_values(a.iter().copied())),
        DynArray::UInt32(a) => Arc::new(UInt32Array::from_iter_values(a.iter().copied())),
        DynArray::Int32(a) => Arc::new(Int32Array::from_iter_values(a.iter().copied())),
        DynArray::UInt64(a) => Arc::new(UInt64Array::from_iter_values(a.iter().copied())),
        DynArray::Int64(a) => Arc::new(Int64Array::from_iter_values(a.iter().copied())),
        DynArray::Float32(a) => Arc::new(Float32Array::from_iter_values(a.iter().copied())),
        DynArray::Float64(a) => Arc::new(Float64Array::from_iter_values(a.iter().copied())),
        DynArray::String(a) => Arc::new(StringArray::from_iter_values(a.iter())),
        DynArray::Int(a) => Arc::new(Int64Array::from_iter_values(a.iter().map(|&v| v as i64))),
        DynArray::Bool(a) => Arc::new(BooleanArray::from(a.iter().copied().collect::<Vec<bool>>())),
    }
}

//==================================================================================
// II. Import
//==================================================================================

/// Imports every frame column as a 1-D column, with the default config.
pub fn frame_to_value(frame: &RecordBatch) -> Result<ColumnTable, TensorFrameError> {
    frame_to_value_with(frame, &BridgeConfig::default())
}

pub fn frame_to_value_with(
    frame: &RecordBatch,
    config: &BridgeConfig,
) -> Result<ColumnTable, TensorFrameError> {
    let schema = frame.schema();
    let mut value = ColumnTable::with_rows(frame.num_rows());

    for (field, array) in schema.fields().iter().zip(frame.columns()) {
        if array.null_count() > 0 {
            return Err(TensorFrameError::InvalidFrame(format!(
                "column {} has {} null cells",
                field.name(),
                array.null_count()
            )));
        }
        value.add_col(field.name(), from_arrow_column(array.as_ref())?)?;
    }
    if config.carry_metadata {
        for (k, v) in schema.metadata() {
            value.set_meta_data(k, v);
        }
    }
    log::debug!(
        "frame_to_value: {} columns, {} rows",
        value.num_cols(),
        value.rows()
    );
    Ok(value)
}

fn from_arrow_column(array: &dyn Array) -> Result<DynArray, TensorFrameError> {
    macro_rules! primitive {
        ($arrow_ty:ty) => {
            DynArray::from(Array1::from(array.as_primitive::<$arrow_ty>().values().to_vec()).into_dyn())
        };
    }

    let col = match DataType::from_arrow_type(array.data_type())? {
        DataType::UInt8 => primitive!(UInt8Type),
        DataType::Int8 => primitive!(Int8Type),
        DataType::UInt16 => primitive!(UInt16Type),
        DataType::Int16 => primitive!(Int16Type),
        DataType::UInt32 => primitive!(UInt32Type),
        DataType::Int32 => primitive!(Int32Type),
        DataType::UInt64 => primitive!(UInt64Type),
        DataType::Int64 => primitive!(Int64Type),
        DataType::Float32 => primitive!(Float32Type),
        DataType::Float64 => primitive!(Float64Type),
        DataType::Bool => {
            let bits = array.as_boolean().values();
            DynArray::from(Array1::from_iter(bits.iter()).into_dyn())
        }
        DataType::String => {
            let strings: Vec<String> = match array.data_type() {
                ArrowDataType::LargeUtf8 => {
                    let a = array.as_string::<i64>();
                    (0..a.len()).map(|i| a.value(i).to_string()).collect()
                }
                _ => {
                    let a = array.as_string::<i32>();
                    (0..a.len()).map(|i| a.value(i).to_string()).collect()
                }
            };
            DynArray::from(Array1::from(strings).into_dyn())
        }
        other => {
            return Err(TensorFrameError::InternalError(format!(
                "arrow type {:?} mapped to {} which has no frame column form",
                array.data_type(),
                other
            )))
        }
    };
    Ok(col)
}
