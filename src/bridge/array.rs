// In: src/bridge/array.rs

//! Typed tensor <-> generic array conversion.
//!
//! Each entry point resolves the element type it dispatches on, looks up the
//! registered handler and delegates to it. The allocating conversions preserve
//! element type and shape exactly. The in-place copies write
//! `min(dst.len(), src.len())` elements in row-major order, cast element-wise
//! when the two sides differ in type, and return the number written.

use crate::bridge::registry::handler_for;
use crate::bridge::DynArray;
use crate::error::TensorFrameError;
use crate::tensor::Tensor;

/// Copies a tensor into a new array of the matching native type and shape.
/// Dispatches on the tensor's type tag.
pub fn to_generic(tensor: &Tensor) -> Result<DynArray, TensorFrameError> {
    let handler = handler_for(tensor.data_type())?;
    log::debug!(
        "to_generic: {} tensor, shape {}",
        tensor.data_type(),
        tensor.shape()
    );
    (handler.to_array)(tensor)
}

/// Copies an array into a new tensor of the matching type tag and shape.
/// Dimension names are not carried by arrays and come back empty.
pub fn from_generic(array: &DynArray) -> Result<Tensor, TensorFrameError> {
    let handler = handler_for(array.data_type())?;
    log::debug!(
        "from_generic: {} array, shape {:?}",
        array.data_type(),
        array.shape()
    );
    (handler.from_array)(array)
}

/// Overwrites `dst` in place from `src`. Dispatches on the source tensor's type.
pub fn copy_into_generic(dst: &mut DynArray, src: &Tensor) -> Result<usize, TensorFrameError> {
    let handler = handler_for(src.data_type())?;
    let written = (handler.copy_to_array)(dst, src)?;
    log_metric!("event" = "copy_into_generic", "from" = src.data_type(), "to" = dst.data_type(), "elements" = written);
    Ok(written)
}

/// Overwrites `dst` in place from `src`. Dispatches on the destination tensor's
/// type.
pub fn copy_into_typed(dst: &mut Tensor, src: &DynArray) -> Result<usize, TensorFrameError> {
    let handler = handler_for(dst.data_type())?;
    let written = (handler.copy_from_array)(dst, src)?;
    log_metric!("event" = "copy_into_typed", "from" = src.data_type(), "to" = dst.data_type(), "elements" = written);
    Ok(written)
}
