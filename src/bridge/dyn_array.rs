// In: src/bridge/dyn_array.rs

//! The generic-array side of the bridge: an `ndarray::ArrayD` of any supported
//! native element type, behind one enum.

use crate::error::TensorFrameError;
use crate::traits::{Element, Scalar};
use crate::types::DataType;
use ndarray::{ArrayD, Axis, IxDyn};
use std::any::Any;

/// A dynamically-typed, dynamically-ranked `ndarray` array.
///
/// One variant per supported element type. `Bool` is unpacked (one `bool` per
/// element) and `Int` is the platform int.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    UInt8(ArrayD<u8>),
    Int8(ArrayD<i8>),
    UInt16(ArrayD<u16>),
    Int16(ArrayD<i16>),
    UInt32(ArrayD<u32>),
    Int32(ArrayD<i32>),
    UInt64(ArrayD<u64>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    String(ArrayD<String>),
    Int(ArrayD<isize>),
    Bool(ArrayD<bool>),
}

/// Evaluates `$body` with `$a` bound to the inner array of whichever variant
/// `$self` holds.
macro_rules! for_each_variant {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            DynArray::UInt8($a) => $body,
            DynArray::Int8($a) => $body,
            DynArray::UInt16($a) => $body,
            DynArray::Int16($a) => $body,
            DynArray::UInt32($a) => $body,
            DynArray::Int32($a) => $body,
            DynArray::UInt64($a) => $body,
            DynArray::Int64($a) => $body,
            DynArray::Float32($a) => $body,
            DynArray::Float64($a) => $body,
            DynArray::String($a) => $body,
            DynArray::Int($a) => $body,
            DynArray::Bool($a) => $body,
        }
    };
}

/// Like `for_each_variant!`, re-wrapping the result in the same variant.
macro_rules! map_same_variant {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            DynArray::UInt8($a) => DynArray::UInt8($body),
            DynArray::Int8($a) => DynArray::Int8($body),
            DynArray::UInt16($a) => DynArray::UInt16($body),
            DynArray::Int16($a) => DynArray::Int16($body),
            DynArray::UInt32($a) => DynArray::UInt32($body),
            DynArray::Int32($a) => DynArray::Int32($body),
            DynArray::UInt64($a) => DynArray::UInt64($body),
            DynArray::Int64($a) => DynArray::Int64($body),
            DynArray::Float32($a) => DynArray::Float32($body),
            DynArray::Float64($a) => DynArray::Float64($body),
            DynArray::String($a) => DynArray::String($body),
            DynArray::Int($a) => DynArray::Int($body),
            DynArray::Bool($a) => DynArray::Bool($body),
        }
    };
}

impl DynArray {
    /// Wraps an arbitrary `ArrayD<T>`. Fails with `UnsupportedType` when `T` is
    /// not one of the supported native element types.
    pub fn try_from_array<T: 'static>(array: ArrayD<T>) -> Result<Self, TensorFrameError> {
        let mut slot = Some(array);
        let any = &mut slot as &mut dyn Any;

        macro_rules! take_as {
            ($($t:ty),+) => {
                $(
                    if let Some(inner) = any.downcast_mut::<Option<ArrayD<$t>>>() {
                        if let Some(a) = inner.take() {
                            return Ok(<$t as Element>::wrap(a));
                        }
                    }
                )+
            };
        }
        take_as!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, String, isize, bool);

        Err(TensorFrameError::UnsupportedType(format!(
            "native element type {} has no tensor counterpart",
            std::any::type_name::<T>()
        )))
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::UInt8(_) => DataType::UInt8,
            Self::Int8(_) => DataType::Int8,
            Self::UInt16(_) => DataType::UInt16,
            Self::Int16(_) => DataType::Int16,
            Self::UInt32(_) => DataType::UInt32,
            Self::Int32(_) => DataType::Int32,
            Self::UInt64(_) => DataType::UInt64,
            Self::Int64(_) => DataType::Int64,
            Self::Float32(_) => DataType::Float32,
            Self::Float64(_) => DataType::Float64,
            Self::String(_) => DataType::String,
            Self::Int(_) => DataType::Int,
            Self::Bool(_) => DataType::Bool,
        }
    }

    pub fn shape(&self) -> &[usize] {
        for_each_variant!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn len(&self) -> usize {
        for_each_variant!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Leading dimension. A rank-0 array counts as one row.
    pub fn rows(&self) -> usize {
        self.shape().first().copied().unwrap_or(1)
    }

    /// Elements per row: the product of every dimension after the first.
    pub fn cell_size(&self) -> usize {
        self.shape().iter().skip(1).product()
    }

    /// Typed view, if this array holds `T`.
    pub fn view<T: Element>(&self) -> Option<ndarray::ArrayViewD<'_, T>> {
        T::view(self)
    }

    /// A copy with the same elements, in logical row-major order, laid out as
    /// `dims`. Fails with `Shape` when the element counts differ.
    pub fn reshape(&self, dims: &[usize]) -> Result<Self, TensorFrameError> {
        Ok(map_same_variant!(self, a => {
            ArrayD::from_shape_vec(IxDyn(dims), a.iter().cloned().collect())?
        }))
    }

    /// The sub-array at index `i` of the leading axis.
    pub fn index_axis0(&self, i: usize) -> Option<Self> {
        if self.ndim() == 0 || i >= self.rows() {
            return None;
        }
        Some(map_same_variant!(self, a => a.index_axis(Axis(0), i).to_owned()))
    }

    /// Every element, widened, in logical row-major order.
    pub fn scalars(&self) -> Box<dyn Iterator<Item = Scalar> + '_> {
        for_each_variant!(self, a => Box::new(a.iter().map(Element::to_scalar)))
    }

    /// Overwrites elements in logical row-major order from `src`, stopping at the
    /// shorter of the two. Returns the number of elements written. A value that
    /// cannot be cast fails with `TypeMismatch`; elements before it stay written.
    pub fn assign_scalars<I>(&mut self, src: I) -> Result<usize, TensorFrameError>
    where
        I: Iterator<Item = Scalar>,
    {
        for_each_variant!(self, a => assign_from(a, src))
    }

    /// Splits the array into `cell_size()` 1-D columns of `rows()` elements,
    /// cell `i` holding element `i` of every row.
    pub(crate) fn split_cells(&self) -> Result<Vec<Self>, TensorFrameError> {
        for_each_variant!(self, a => split_as(a))
    }

    /// Joins arrays of one element type along the cell axis: each part is
    /// viewed as `(rows, cell_size)` and the parts are concatenated column-wise.
    pub(crate) fn concat_cells(parts: &[&DynArray]) -> Result<Self, TensorFrameError> {
        let (first, rest) = parts.split_first().ok_or_else(|| {
            TensorFrameError::InvalidArgument("no arrays to concatenate".to_string())
        })?;
        Ok(map_same_variant!(first, a => concat_as(a, rest)?))
    }
}

impl<T: Element> From<ArrayD<T>> for DynArray {
    fn from(array: ArrayD<T>) -> Self {
        T::wrap(array)
    }
}

fn assign_from<T: Element>(
    dst: &mut ArrayD<T>,
    src: impl Iterator<Item = Scalar>,
) -> Result<usize, TensorFrameError> {
    let mut written = 0;
    for (d, s) in dst.iter_mut().zip(src) {
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

fn as_row_matrix<T: Element>(
    view: ndarray::ArrayViewD<'_, T>,
) -> Result<ndarray::Array2<T>, TensorFrameError> {
    let rows = view.shape().first().copied().unwrap_or(1);
    let cells = view.shape().iter().skip(1).product();
    Ok(ndarray::Array2::from_shape_vec(
        (rows, cells),
        view.iter().cloned().collect(),
    )?)
}

fn split_as<T: Element>(array: &ArrayD<T>) -> Result<Vec<DynArray>, TensorFrameError> {
    let matrix = as_row_matrix(array.view())?;
    Ok(matrix
        .axis_iter(Axis(1))
        .map(|cell| T::wrap(cell.to_owned().into_dyn()))
        .collect())
}

fn concat_as<T: Element>(
    first: &ArrayD<T>,
    rest: &[&DynArray],
) -> Result<ArrayD<T>, TensorFrameError> {
    let mut mats = Vec::with_capacity(rest.len() + 1);
    mats.push(as_row_matrix(first.view())?);
    for part in rest {
        let view = T::view(part).ok_or_else(|| {
            TensorFrameError::TypeMismatch(format!(
                "cannot join {} with {}",
                T::DATA_TYPE,
                part.data_type()
            ))
        })?;
        mats.push(as_row_matrix(view)?);
    }
    let views: Vec<_> = mats.iter().map(|m| m.view()).collect();
    Ok(ndarray::concatenate(Axis(1), &views)?.into_dyn())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, ArrayD};

    #[test]
    fn test_try_from_array_accepts_supported_types() {
        let a = DynArray::try_from_array(array![[1i16, 2], [3, 4]].into_dyn()).unwrap();
        assert_eq!(a.data_type(), DataType::Int16);
        assert_eq!(a.shape(), &[2, 2]);

        let s = DynArray::try_from_array(ArrayD::from_elem(IxDyn(&[2]), "x".to_string())).unwrap();
        assert!(s.is_string());
    }

    #[test]
    fn test_try_from_array_rejects_unknown_native_types() {
        let res = DynArray::try_from_array(ArrayD::from_elem(IxDyn(&[3]), 7i128));
        assert!(matches!(res, Err(TensorFrameError::UnsupportedType(_))));
        let res = DynArray::try_from_array(ArrayD::from_elem(IxDyn(&[1]), 'c'));
        assert!(matches!(res, Err(TensorFrameError::UnsupportedType(_))));
    }

    #[test]
    fn test_reshape_keeps_logical_order() {
        let a = DynArray::from(array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn());
        let r = a.reshape(&[3, 2]).unwrap();
        let v = r.view::<f64>().unwrap();
        assert_eq!(v.shape(), &[3, 2]);
        assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(matches!(a.reshape(&[4]), Err(TensorFrameError::Shape(_))));
    }

    #[test]
    fn test_empty_reshape_is_not_an_error() {
        let a = DynArray::from(ArrayD::<u8>::zeros(IxDyn(&[0, 4])));
        assert_eq!(a.reshape(&[0, 2, 2]).unwrap().shape(), &[0, 2, 2]);
    }

    #[test]
    fn test_assign_scalars_stops_at_shorter_side() {
        let mut a = DynArray::from(ArrayD::<i32>::zeros(IxDyn(&[4])));
        let n = a
            .assign_scalars(vec![Scalar::Float(1.5), Scalar::Bool(true)].into_iter())
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            a.view::<i32>().unwrap().iter().copied().collect::<Vec<_>>(),
            vec![1, 1, 0, 0]
        );
    }

    #[test]
    fn test_assign_scalars_partial_write_on_parse_failure() {
        let mut a = DynArray::from(ArrayD::<f32>::zeros(IxDyn(&[3])));
        let src = vec![
            Scalar::Str("2.5".into()),
            Scalar::Str("baker".into()),
            Scalar::Str("4".into()),
        ];
        let res = a.assign_scalars(src.into_iter());
        assert!(matches!(res, Err(TensorFrameError::TypeMismatch(_))));
        assert_eq!(
            a.view::<f32>().unwrap().iter().copied().collect::<Vec<_>>(),
            vec![2.5, 0.0, 0.0]
        );
    }

    #[test]
    fn test_concat_cells_joins_column_wise() {
        let a = DynArray::from(array![1u8, 2].into_dyn());
        let b = DynArray::from(array![[3u8, 4], [5, 6]].into_dyn());
        let joined = DynArray::concat_cells(&[&a, &b]).unwrap();
        let v = joined.view::<u8>().unwrap();
        assert_eq!(v.shape(), &[2, 3]);
        assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 2, 5, 6]);

        let c = DynArray::from(array![1.0f32, 2.0].into_dyn());
        assert!(matches!(
            DynArray::concat_cells(&[&a, &c]),
            Err(TensorFrameError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_split_cells_is_inverse_of_concat() {
        let a = DynArray::from(ArrayD::from_shape_vec(IxDyn(&[2, 2, 3]), (0..12i64).collect()).unwrap());
        let cells = a.split_cells().unwrap();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[4], DynArray::from(array![4i64, 10].into_dyn()));

        let refs: Vec<&DynArray> = cells.iter().collect();
        let joined = DynArray::concat_cells(&refs).unwrap();
        assert_eq!(joined.reshape(&[2, 2, 3]).unwrap(), a);
    }

    #[test]
    fn test_index_axis0() {
        let a = DynArray::from(array![[true, false], [false, true]].into_dyn());
        let row = a.index_axis0(1).unwrap();
        assert_eq!(row.shape(), &[2]);
        assert_eq!(
            row.view::<bool>().unwrap().iter().copied().collect::<Vec<_>>(),
            vec![false, true]
        );
        assert!(a.index_axis0(2).is_none());
    }
}
