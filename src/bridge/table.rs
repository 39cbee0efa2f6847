// In: src/bridge/table.rs

//! Tensor table <-> `ColumnTable` conversion, column by column.

use crate::bridge::array::{copy_into_generic, copy_into_typed, from_generic, to_generic};
use crate::bridge::ColumnTable;
use crate::error::TensorFrameError;
use crate::table::Table;

/// Converts every column in order and copies the metadata entries.
pub fn table_to_value(table: &Table) -> Result<ColumnTable, TensorFrameError> {
    let mut value = ColumnTable::with_rows(table.rows());
    for (name, col) in table.col_names().iter().zip(table.cols()) {
        value.add_col(name, to_generic(col)?)?;
    }
    for (k, v) in table.meta_data_map() {
        value.set_meta_data(k, v);
    }
    log::info!(
        "table_to_value: {} columns, {} rows",
        value.num_cols(),
        value.rows()
    );
    Ok(value)
}

/// The inverse of [`table_to_value`]. Every column must have the value's row
/// count as its leading dimension.
pub fn value_to_table(value: &ColumnTable) -> Result<Table, TensorFrameError> {
    let mut table = Table::with_rows(value.rows());
    for (name, col) in value.iter() {
        table.add_col(name, from_generic(col)?)?;
    }
    for (k, v) in value.meta_data_map() {
        table.set_meta_data(k, v);
    }
    log::info!(
        "value_to_table: {} columns, {} rows",
        table.num_cols(),
        table.rows()
    );
    Ok(table)
}

/// Copies each `src` column into the `dst` column of the same name. Columns
/// with no namesake in `dst` are skipped.
pub fn copy_value_into_table(dst: &mut Table, src: &ColumnTable) -> Result<(), TensorFrameError> {
    for (name, col) in src.iter() {
        match dst.col_by_name_mut(name) {
            Some(target) => {
                copy_into_typed(target, col)?;
            }
            None => log::debug!("copy_value_into_table: skipping {}, not in destination", name),
        }
    }
    Ok(())
}

/// Copies each `src` column into the `dst` column of the same name. Columns
/// with no namesake in `dst` are skipped.
pub fn copy_table_into_value(dst: &mut ColumnTable, src: &Table) -> Result<(), TensorFrameError> {
    for (name, col) in src.col_names().iter().zip(src.cols()) {
        match dst.col_by_name_mut(name) {
            Ok(target) => {
                copy_into_generic(target, col)?;
            }
            Err(TensorFrameError::MissingColumn(_)) => {
                log::debug!("copy_table_into_value: skipping {}, not in destination", name)
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
