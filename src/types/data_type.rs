//! This module defines the canonical, type-safe element type tag carried by every
//! tensor, and its translation to and from Arrow types.

use crate::error::TensorFrameError;
use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The element type a tensor declares for its flat value buffer.
///
/// The host library can declare more tags than the bridge converts: `Float16`,
/// `Complex64` and `Complex128` tensors exist, but every conversion rejects them
/// with `UnsupportedType`. See [`DataType::is_supported`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    /// 1 bit per value, LSB bit-packed.
    Bool,
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float16,
    Float32,
    Float64,
    /// UTF-8 variable-length string.
    String,
    /// The platform int (`isize`).
    Int,
    Complex64,
    Complex128,
}

impl DataType {
    /// All tags the bridge converts, in dispatch-table order.
    pub const SUPPORTED: [DataType; 13] = [
        Self::UInt8,
        Self::Int8,
        Self::UInt16,
        Self::Int16,
        Self::UInt32,
        Self::Int32,
        Self::UInt64,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::String,
        Self::Int,
        Self::Bool,
    ];

    /// Returns `true` if the bridge has a handler for this tag.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Float16 | Self::Complex64 | Self::Complex128)
    }

    /// Returns `true` for integer and floating-point tags (not `Bool`, `String`).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::UInt8
                | Self::Int8
                | Self::UInt16
                | Self::Int16
                | Self::UInt32
                | Self::Int32
                | Self::UInt64
                | Self::Int64
                | Self::Float16
                | Self::Float32
                | Self::Float64
                | Self::Int
        )
    }

    /// Converts an Arrow `DataType` into a `DataType`.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, TensorFrameError> {
        match arrow_type {
            ArrowDataType::Boolean => Ok(Self::Bool),
            ArrowDataType::UInt8 => Ok(Self::UInt8),
            ArrowDataType::Int8 => Ok(Self::Int8),
            ArrowDataType::UInt16 => Ok(Self::UInt16),
            ArrowDataType::Int16 => Ok(Self::Int16),
            ArrowDataType::UInt32 => Ok(Self::UInt32),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::UInt64 => Ok(Self::UInt64),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::Float32 => Ok(Self::Float32),
            ArrowDataType::Float64 => Ok(Self::Float64),
            ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 => Ok(Self::String),
            dt => Err(TensorFrameError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to DataType",
                dt
            ))),
        }
    }

    /// Converts a `DataType` into the Arrow `DataType` used for frame columns.
    /// The platform int is exported as `Int64`.
    pub fn to_arrow_type(&self) -> Result<ArrowDataType, TensorFrameError> {
        match self {
            Self::Bool => Ok(ArrowDataType::Boolean),
            Self::UInt8 => Ok(ArrowDataType::UInt8),
            Self::Int8 => Ok(ArrowDataType::Int8),
            Self::UInt16 => Ok(ArrowDataType::UInt16),
            Self::Int16 => Ok(ArrowDataType::Int16),
            Self::UInt32 => Ok(ArrowDataType::UInt32),
            Self::Int32 => Ok(ArrowDataType::Int32),
            Self::UInt64 => Ok(ArrowDataType::UInt64),
            Self::Int64 | Self::Int => Ok(ArrowDataType::Int64),
            Self::Float32 => Ok(ArrowDataType::Float32),
            Self::Float64 => Ok(ArrowDataType::Float64),
            Self::String => Ok(ArrowDataType::Utf8),
            dt => Err(TensorFrameError::UnsupportedType(format!(
                "{} has no Arrow frame column type",
                dt
            ))),
        }
    }
}

/// Provides the canonical string representation for a `DataType`.
impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_set_excludes_half_and_complex() {
        assert_eq!(DataType::SUPPORTED.len(), 13);
        assert!(DataType::SUPPORTED.iter().all(|dt| dt.is_supported()));
        assert!(!DataType::Float16.is_supported());
        assert!(!DataType::Complex64.is_supported());
        assert!(!DataType::Complex128.is_supported());
    }

    #[test]
    fn test_arrow_mapping() {
        assert_eq!(
            DataType::from_arrow_type(&ArrowDataType::LargeUtf8).unwrap(),
            DataType::String
        );
        assert_eq!(DataType::Int.to_arrow_type().unwrap(), ArrowDataType::Int64);
        assert_eq!(
            DataType::Bool.to_arrow_type().unwrap(),
            ArrowDataType::Boolean
        );
        assert!(matches!(
            DataType::from_arrow_type(&ArrowDataType::Date32),
            Err(TensorFrameError::UnsupportedType(_))
        ));
        assert!(DataType::Complex64.to_arrow_type().is_err());
    }

    #[test]
    fn test_numeric_classification() {
        assert!(DataType::Int.is_numeric());
        assert!(DataType::Float32.is_numeric());
        assert!(!DataType::Bool.is_numeric());
        assert!(!DataType::String.is_numeric());
    }
}
