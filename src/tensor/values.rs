//! Per-type flat value storage for tensors.

use crate::types::DataType;
use bitvec::prelude::*;

/// The flat, row-major value buffer of a tensor, one variant per declarable type.
///
/// `Bool` is bit-packed. `Float16` holds raw half-precision bit patterns and the
/// complex variants hold `[re, im]` pairs; the bridge has no handler for those three.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Bool(BitVec<u8, Lsb0>),
    UInt8(Vec<u8>),
    Int8(Vec<i8>),
    UInt16(Vec<u16>),
    Int16(Vec<i16>),
    UInt32(Vec<u32>),
    Int32(Vec<i32>),
    UInt64(Vec<u64>),
    Int64(Vec<i64>),
    Float16(Vec<u16>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    String(Vec<String>),
    Int(Vec<isize>),
    Complex64(Vec<[f32; 2]>),
    Complex128(Vec<[f64; 2]>),
}

impl Values {
    /// Zero-filled storage of `len` elements.
    pub fn zeros(data_type: DataType, len: usize) -> Self {
        match data_type {
            DataType::Bool => Self::Bool(BitVec::repeat(false, len)),
            DataType::UInt8 => Self::UInt8(vec![0; len]),
            DataType::Int8 => Self::Int8(vec![0; len]),
            DataType::UInt16 => Self::UInt16(vec![0; len]),
            DataType::Int16 => Self::Int16(vec![0; len]),
            DataType::UInt32 => Self::UInt32(vec![0; len]),
            DataType::Int32 => Self::Int32(vec![0; len]),
            DataType::UInt64 => Self::UInt64(vec![0; len]),
            DataType::Int64 => Self::Int64(vec![0; len]),
            DataType::Float16 => Self::Float16(vec![0; len]),
            DataType::Float32 => Self::Float32(vec![0.0; len]),
            DataType::Float64 => Self::Float64(vec![0.0; len]),
            DataType::String => Self::String(vec![String::new(); len]),
            DataType::Int => Self::Int(vec![0; len]),
            DataType::Complex64 => Self::Complex64(vec![[0.0; 2]; len]),
            DataType::Complex128 => Self::Complex128(vec![[0.0; 2]; len]),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Bool(_) => DataType::Bool,
            Self::UInt8(_) => DataType::UInt8,
            Self::Int8(_) => DataType::Int8,
            Self::UInt16(_) => DataType::UInt16,
            Self::Int16(_) => DataType::Int16,
            Self::UInt32(_) => DataType::UInt32,
            Self::Int32(_) => DataType::Int32,
            Self::UInt64(_) => DataType::UInt64,
            Self::Int64(_) => DataType::Int64,
            Self::Float16(_) => DataType::Float16,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
            Self::String(_) => DataType::String,
            Self::Int(_) => DataType::Int,
            Self::Complex64(_) => DataType::Complex64,
            Self::Complex128(_) => DataType::Complex128,
        }
    }

    /// Logical element count (bits for `Bool`, not bytes).
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::UInt8(v) => v.len(),
            Self::Int8(v) => v.len(),
            Self::UInt16(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::UInt32(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::UInt64(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float16(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::String(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Complex64(v) => v.len(),
            Self::Complex128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The packed bit buffer of a `Bool` tensor.
    pub fn as_bits(&self) -> Option<&BitSlice<u8, Lsb0>> {
        match self {
            Self::Bool(bits) => Some(bits.as_bitslice()),
            _ => None,
        }
    }

    pub fn as_bits_mut(&mut self) -> Option<&mut BitSlice<u8, Lsb0>> {
        match self {
            Self::Bool(bits) => Some(bits.as_mut_bitslice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_covers_every_tag() {
        for dt in [
            DataType::Bool,
            DataType::Float16,
            DataType::Complex128,
            DataType::String,
            DataType::Int,
        ] {
            let v = Values::zeros(dt, 5);
            assert_eq!(v.data_type(), dt);
            assert_eq!(v.len(), 5);
        }
    }

    #[test]
    fn test_bits_use_packed_bytes() {
        let v = Values::zeros(DataType::Bool, 20);
        match &v {
            Values::Bool(bits) => assert_eq!(bits.as_raw_slice().len(), 3),
            _ => unreachable!(),
        }
        assert!(v.as_bits().is_some());
        assert!(Values::zeros(DataType::UInt8, 1).as_bits().is_none());
    }
}
