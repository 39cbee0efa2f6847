//! This file is the root of the `tensorframe` Rust crate.
//!
//! `tensorframe` converts tables of named, typed tensor columns to and from
//! `ndarray` arrays, a plain column table, Arrow record batches and tensor
//! datasets. See the `bridge` module for the conversion layers.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod patgen;
pub mod table;
pub mod tensor;
pub mod traits;
pub mod types;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{ColumnTable, DynArray, TensorDataset};
pub use config::BridgeConfig;
pub use error::TensorFrameError;
pub use observability::init_logging;
pub use table::{ColumnSpec, Schema, Table};
pub use tensor::{Shape, Tensor, Values};
pub use types::DataType;
