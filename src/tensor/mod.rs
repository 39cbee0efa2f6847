//! A minimal model of the host toolkit's typed tensor: a flat, row-major value
//! buffer tagged with one `DataType`, plus a `Shape`.
//!
//! This is the surface the bridge consumes (type tag, flat buffer per type,
//! shape, in-place buffer writes). It is not a tensor math library.

pub mod shape;
pub mod values;

pub use shape::Shape;
pub use values::Values;

use crate::error::TensorFrameError;
use crate::traits::{Element, Scalar};
use crate::types::DataType;

/// A fixed-shape, fixed-element-type tensor.
///
/// Invariant: `values.len() == shape.len()`. Every constructor checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    values: Values,
}

impl Tensor {
    /// A zero-filled tensor of the given type and shape.
    pub fn new(data_type: DataType, dims: &[usize], names: &[&str]) -> Result<Self, TensorFrameError> {
        let shape = Shape::new(dims, names)?;
        let values = Values::zeros(data_type, shape.len());
        Ok(Self { shape, values })
    }

    /// Wraps existing storage, validating its length against `shape`.
    pub fn from_values(values: Values, shape: Shape) -> Result<Self, TensorFrameError> {
        if values.len() != shape.len() {
            return Err(TensorFrameError::ShapeMismatch(format!(
                "{} values do not fill shape {} ({} elements)",
                values.len(),
                shape,
                shape.len()
            )));
        }
        Ok(Self { shape, values })
    }

    /// Builds a tensor from a row-major `Vec` of any supported element type.
    pub fn from_vec<T: Element>(data: Vec<T>, dims: &[usize]) -> Result<Self, TensorFrameError> {
        Self::from_values(T::into_values(data), Shape::unnamed(dims)?)
    }

    /// Builds a bit-packed `Bool` tensor.
    pub fn from_bools(data: &[bool], dims: &[usize]) -> Result<Self, TensorFrameError> {
        Self::from_vec(data.to_vec(), dims)
    }

    pub fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Mutable access to the buffer. The variant and length must not change.
    pub(crate) fn values_mut(&mut self) -> &mut Values {
        &mut self.values
    }

    /// Typed flat view, if the tensor stores `T` in slice form.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.values)
    }

    /// Mutable typed flat view. Elements can be overwritten; the length is fixed.
    pub fn as_slice_mut<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(&mut self.values)
    }

    /// Mutable view of a `Bool` tensor's packed bits.
    pub fn as_bits_mut(&mut self) -> Option<&mut bitvec::slice::BitSlice<u8, bitvec::order::Lsb0>> {
        self.values.as_bits_mut()
    }

    pub fn bool1d(&self, i: usize) -> Option<bool> {
        self.values.as_bits().and_then(|bits| bits.get(i).map(|b| *b))
    }

    pub fn set_bool1d(&mut self, i: usize, val: bool) -> Result<(), TensorFrameError> {
        let len = self.len();
        let dt = self.data_type();
        let bits = self.values.as_bits_mut().ok_or_else(|| {
            TensorFrameError::TypeMismatch(format!("set_bool1d on a {} tensor", dt))
        })?;
        if i >= len {
            return Err(out_of_range(i, len));
        }
        bits.set(i, val);
        Ok(())
    }

    /// Value at flat offset `i`, as `f64`. `None` for string, unsupported or
    /// out-of-range cells.
    pub fn float1d(&self, i: usize) -> Option<f64> {
        match self.scalar1d(i)? {
            Scalar::Int(v) => Some(v as f64),
            Scalar::Float(v) => Some(v),
            Scalar::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Scalar::Str(_) => None,
        }
    }

    /// Sets flat offset `i` from an `f64`, cast to the tensor's element type.
    pub fn set_float1d(&mut self, i: usize, val: f64) -> Result<(), TensorFrameError> {
        self.set_scalar1d(i, &Scalar::Float(val))
    }

    /// Value at flat offset `i` rendered as a string.
    pub fn string1d(&self, i: usize) -> Option<String> {
        self.scalar1d(i).and_then(|s| String::from_scalar(&s))
    }

    /// Sets flat offset `i` from a string, parsed when the tensor is not a
    /// `String` tensor.
    pub fn set_string1d(&mut self, i: usize, val: &str) -> Result<(), TensorFrameError> {
        self.set_scalar1d(i, &Scalar::Str(val.to_string()))
    }

    pub(crate) fn scalar1d(&self, i: usize) -> Option<Scalar> {
        macro_rules! cell {
            ($v:expr) => {
                $v.get(i).map(Element::to_scalar)
            };
        }
        match &self.values {
            Values::Bool(bits) => bits.get(i).map(|b| Scalar::Bool(*b)),
            Values::UInt8(v) => cell!(v),
            Values::Int8(v) => cell!(v),
            Values::UInt16(v) => cell!(v),
            Values::Int16(v) => cell!(v),
            Values::UInt32(v) => cell!(v),
            Values::Int32(v) => cell!(v),
            Values::UInt64(v) => cell!(v),
            Values::Int64(v) => cell!(v),
            Values::Float32(v) => cell!(v),
            Values::Float64(v) => cell!(v),
            Values::String(v) => cell!(v),
            Values::Int(v) => cell!(v),
            Values::Float16(_) | Values::Complex64(_) | Values::Complex128(_) => None,
        }
    }

    pub(crate) fn set_scalar1d(&mut self, i: usize, val: &Scalar) -> Result<(), TensorFrameError> {
        let len = self.len();
        if i >= len {
            return Err(out_of_range(i, len));
        }
        let dt = self.data_type();
        macro_rules! put {
            ($v:expr, $t:ty) => {{
                $v[i] = <$t>::from_scalar(val).ok_or_else(|| {
                    TensorFrameError::TypeMismatch(format!("cannot store {:?} in a {} tensor", val, dt))
                })?;
            }};
        }
        match &mut self.values {
            Values::Bool(bits) => {
                let b = bool::from_scalar(val).ok_or_else(|| {
                    TensorFrameError::TypeMismatch(format!("cannot store {:?} in a {} tensor", val, dt))
                })?;
                bits.set(i, b);
            }
            Values::UInt8(v) => put!(v, u8),
            Values::Int8(v) => put!(v, i8),
            Values::UInt16(v) => put!(v, u16),
            Values::Int16(v) => put!(v, i16),
            Values::UInt32(v) => put!(v, u32),
            Values::Int32(v) => put!(v, i32),
            Values::UInt64(v) => put!(v, u64),
            Values::Int64(v) => put!(v, i64),
            Values::Float32(v) => put!(v, f32),
            Values::Float64(v) => put!(v, f64),
            Values::String(v) => put!(v, String),
            Values::Int(v) => put!(v, isize),
            Values::Float16(_) | Values::Complex64(_) | Values::Complex128(_) => {
                return Err(TensorFrameError::UnsupportedType(format!(
                    "cell writes on a {} tensor",
                    dt
                )))
            }
        }
        Ok(())
    }
}

fn out_of_range(i: usize, len: usize) -> TensorFrameError {
    TensorFrameError::InvalidArgument(format!("offset {} out of range for {} elements", i, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled_with_names() {
        let t = Tensor::new(DataType::Float32, &[3, 4, 5], &["row", "Y", "X"]).unwrap();
        assert_eq!(t.len(), 60);
        assert_eq!(t.data_type(), DataType::Float32);
        assert_eq!(t.shape().dim_names()[1], "Y");
        assert!(t.as_slice::<f32>().unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_vec_rejects_length_mismatch() {
        let res = Tensor::from_vec(vec![1u16, 2, 3], &[2, 2]);
        assert!(matches!(res, Err(TensorFrameError::ShapeMismatch(_))));
    }

    #[test]
    fn test_new_rejects_overflowing_shape() {
        let huge = 1usize << (usize::BITS / 2);
        let res = Tensor::new(DataType::Float32, &[2, huge, huge], &[]);
        assert!(matches!(res, Err(TensorFrameError::ShapeMismatch(_))));
    }

    #[test]
    fn test_mutable_views_keep_length() {
        let mut t = Tensor::from_vec(vec![1i32, 2, 3], &[3]).unwrap();
        t.as_slice_mut::<i32>().unwrap()[1] = 20;
        assert_eq!(t.as_slice::<i32>().unwrap(), &[1, 20, 3]);
        assert!(t.as_slice_mut::<f32>().is_none());
        assert!(t.as_bits_mut().is_none());

        let mut b = Tensor::from_bools(&[false, false], &[2]).unwrap();
        b.as_bits_mut().unwrap().set(1, true);
        assert_eq!(b.bool1d(1), Some(true));
    }

    #[test]
    fn test_bits_cell_access() {
        let mut t = Tensor::new(DataType::Bool, &[2, 3], &[]).unwrap();
        t.set_bool1d(4, true).unwrap();
        assert_eq!(t.bool1d(4), Some(true));
        assert_eq!(t.bool1d(3), Some(false));
        assert_eq!(t.bool1d(6), None);
        assert!(t.set_bool1d(6, true).is_err());
        assert_eq!(t.float1d(4), Some(1.0));
    }

    #[test]
    fn test_float_cells_cast_to_element_type() {
        let mut t = Tensor::new(DataType::UInt32, &[3], &[]).unwrap();
        t.set_float1d(1, 7.8).unwrap();
        assert_eq!(t.as_slice::<u32>().unwrap(), &[0, 7, 0]);
        assert_eq!(t.string1d(1).as_deref(), Some("7"));
    }

    #[test]
    fn test_string_tensor_cells() {
        let mut t = Tensor::from_vec(
            vec!["any".to_string(), "baker".into(), "cheese".into()],
            &[3],
        )
        .unwrap();
        assert_eq!(t.string1d(2).as_deref(), Some("cheese"));
        assert_eq!(t.float1d(0), None);
        t.set_float1d(0, 2.0).unwrap();
        assert_eq!(t.string1d(0).as_deref(), Some("2"));

        let mut n = Tensor::new(DataType::Int16, &[1], &[]).unwrap();
        n.set_string1d(0, "-12").unwrap();
        assert_eq!(n.float1d(0), Some(-12.0));
        assert!(matches!(
            n.set_string1d(0, "dog"),
            Err(TensorFrameError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_unsupported_cells_are_rejected() {
        let mut t = Tensor::new(DataType::Complex64, &[2], &[]).unwrap();
        assert_eq!(t.float1d(0), None);
        assert!(matches!(
            t.set_float1d(0, 1.0),
            Err(TensorFrameError::UnsupportedType(_))
        ));
    }
}
