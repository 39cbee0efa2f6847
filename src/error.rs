// In: src/error.rs

//! This module defines the single, unified error type for the entire tensorframe library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensorFrameError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A declared or native element type outside the supported dispatch set.
    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    /// A name lookup failed (`col_by_name`, `merge_columns`, `reshape_column`).
    #[error("column named: {0} not found")]
    MissingColumn(String),

    #[error("column named: {0} already exists")]
    DuplicateColumn(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Element values could not be converted between two element types.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The frame cannot be imported as-is (e.g. it contains null cells).
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// A reshape or stack rejected by ndarray.
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error originating from the underlying I/O subsystem (log file targets).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
