// In: src/bridge/registry.rs

//! The type-tag dispatch table.
//!
//! Every supported `DataType` is registered once with a handler carrying the
//! four element-wise conversions between a `Tensor` and a `DynArray`. Slice
//! backed types share one generic implementation; bit-packed `Bool` tensors get
//! their own, which unpack and repack one bit at a time.

use crate::bridge::DynArray;
use crate::error::TensorFrameError;
use crate::tensor::{Shape, Tensor, Values};
use crate::traits::Element;
use crate::types::DataType;
use bitvec::prelude::*;
use ndarray::{ArrayD, IxDyn};

type Result<T> = std::result::Result<T, TensorFrameError>;

/// The conversions registered for one element type.
pub struct ElementHandler {
    pub data_type: DataType,
    /// Allocates a new array holding the tensor's elements in its shape.
    pub to_array: fn(&Tensor) -> Result<DynArray>,
    /// Allocates a new tensor holding the array's elements in its shape.
    pub from_array: fn(&DynArray) -> Result<Tensor>,
    /// Overwrites the array in place from a tensor of this type.
    pub copy_to_array: fn(&mut DynArray, &Tensor) -> Result<usize>,
    /// Overwrites a tensor of this type in place from the array.
    pub copy_from_array: fn(&mut Tensor, &DynArray) -> Result<usize>,
}

macro_rules! slice_handler {
    ($variant:ident, $t:ty) => {
        ElementHandler {
            data_type: DataType::$variant,
            to_array: slice_to_array::<$t>,
            from_array: array_to_slice::<$t>,
            copy_to_array: copy_slice_to_array::<$t>,
            copy_from_array: copy_array_to_slice::<$t>,
        }
    };
}

static HANDLERS: [ElementHandler; 13] = [
    slice_handler!(UInt8, u8),
    slice_handler!(Int8, i8),
    slice_handler!(UInt16, u16),
    slice_handler!(Int16, i16),
    slice_handler!(UInt32, u32),
    slice_handler!(Int32, i32),
    slice_handler!(UInt64, u64),
    slice_handler!(Int64, i64),
    slice_handler!(Float32, f32),
    slice_handler!(Float64, f64),
    slice_handler!(String, String),
    slice_handler!(Int, isize),
    ElementHandler {
        data_type: DataType::Bool,
        to_array: bits_to_array,
        from_array: array_to_bits,
        copy_to_array: copy_bits_to_array,
        copy_from_array: copy_array_to_bits,
    },
];

/// Looks up the handler for `data_type`, failing with `UnsupportedType` when
/// none is registered.
pub fn handler_for(data_type: DataType) -> Result<&'static ElementHandler> {
    HANDLERS
        .iter()
        .find(|h| h.data_type == data_type)
        .ok_or_else(|| {
            TensorFrameError::UnsupportedType(format!("no conversion registered for {}", data_type))
        })
}

/// Storage that does not match the registered tag means a handler was invoked
/// with the wrong tensor, not bad user input.
fn storage_mismatch(expected: DataType, found: DataType) -> TensorFrameError {
    TensorFrameError::InternalError(format!(
        "{} handler invoked on {} storage",
        expected, found
    ))
}

//==================================================================================
// I. Slice-backed element types
//==================================================================================

fn slice_to_array<T: Element>(tensor: &Tensor) -> Result<DynArray> {
    let data = T::slice(tensor.values())
        .ok_or_else(|| storage_mismatch(T::DATA_TYPE, tensor.data_type()))?;
    let array = ArrayD::from_shape_vec(IxDyn(tensor.dims()), data.to_vec())?;
    Ok(T::wrap(array))
}

fn array_to_slice<T: Element>(array: &DynArray) -> Result<Tensor> {
    let view = T::view(array).ok_or_else(|| storage_mismatch(T::DATA_TYPE, array.data_type()))?;
    let data: Vec<T> = view.iter().cloned().collect();
    Tensor::from_vec(data, view.shape())
}

fn copy_slice_to_array<T: Element>(dst: &mut DynArray, src: &Tensor) -> Result<usize> {
    let data =
        T::slice(src.values()).ok_or_else(|| storage_mismatch(T::DATA_TYPE, src.data_type()))?;
    if let Some(mut out) = T::view_mut(dst) {
        let mut written = 0;
        for (d, s) in out.iter_mut().zip(data) {
            d.clone_from(s);
            written += 1;
        }
        return Ok(written);
    }
    dst.assign_scalars(data.iter().map(Element::to_scalar))
}

fn copy_array_to_slice<T: Element>(dst: &mut Tensor, src: &DynArray) -> Result<usize> {
    let found = dst.data_type();
    let out = T::slice_mut(dst.values_mut()).ok_or_else(|| storage_mismatch(T::DATA_TYPE, found))?;
    let mut written = 0;
    if let Some(view) = T::view(src) {
        for (d, s) in out.iter_mut().zip(view.iter()) {
            d.clone_from(s);
            written += 1;
        }
        return Ok(written);
    }
    for (d, s) in out.iter_mut().zip(src.scalars()) {
        *d = T::from_scalar(&s).ok_or_else(|| {
            TensorFrameError::TypeMismatch(format!(
                "cannot cast {:?} to {} (after {} elements)",
                s,
                T::DATA_TYPE,
                written
            ))
        })?;
        written += 1;
    }
    Ok(written)
}

//==================================================================================
// II. Bit-packed booleans
//==================================================================================

fn bits_of(tensor: &Tensor) -> Result<&BitSlice<u8, Lsb0>> {
    tensor
        .values()
        .as_bits()
        .ok_or_else(|| storage_mismatch(DataType::Bool, tensor.data_type()))
}

fn bits_to_array(tensor: &Tensor) -> Result<DynArray> {
    let bits = bits_of(tensor)?;
    let unpacked: Vec<bool> = bits.iter().by_vals().collect();
    let array = ArrayD::from_shape_vec(IxDyn(tensor.dims()), unpacked)?;
    Ok(DynArray::Bool(array))
}

fn array_to_bits(array: &DynArray) -> Result<Tensor> {
    let view = bool::view(array).ok_or_else(|| storage_mismatch(DataType::Bool, array.data_type()))?;
    let bits: BitVec<u8, Lsb0> = view.iter().copied().collect();
    Tensor::from_values(Values::Bool(bits), Shape::unnamed(view.shape())?)
}

fn copy_bits_to_array(dst: &mut DynArray, src: &Tensor) -> Result<usize> {
    let bits = bits_of(src)?;
    if let Some(mut out) = bool::view_mut(dst) {
        let mut written = 0;
        for (d, s) in out.iter_mut().zip(bits.iter().by_vals()) {
            *d = s;
            written += 1;
        }
        return Ok(written);
    }
    dst.assign_scalars(bits.iter().by_vals().map(|b| b.to_scalar()))
}

fn copy_array_to_bits(dst: &mut Tensor, src: &DynArray) -> Result<usize> {
    let found = dst.data_type();
    let bits = dst
        .values_mut()
        .as_bits_mut()
        .ok_or_else(|| storage_mismatch(DataType::Bool, found))?;
    let mut written = 0;
    for (i, s) in src.scalars().take(bits.len()).enumerate() {
        let b = bool::from_scalar(&s).ok_or_else(|| {
            TensorFrameError::TypeMismatch(format!(
                "cannot cast {:?} to Bool (after {} elements)",
                s, written
            ))
        })?;
        bits.set(i, b);
        written += 1;
    }
    Ok(written)
}
