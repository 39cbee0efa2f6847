//! This module defines the core, strongly-typed data representations shared by
//! the tensor model and the bridge.
//!
//! It currently includes the canonical `DataType` enum, the element type tag
//! every tensor declares, with its mapping onto Arrow types.

pub mod data_type;

// Re-export the main type(s) for easier access.
pub use data_type::DataType;
