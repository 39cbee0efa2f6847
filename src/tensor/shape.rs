//! Shape bookkeeping for row-major tensors: dimension sizes, strides and
//! optional per-dimension names.

use crate::error::TensorFrameError;
use std::fmt;

/// A tensor's shape. The inner-most (right-most) dimension is contiguous in memory.
///
/// Every constructor checks that the element count and every stride fit in a
/// `usize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
    names: Vec<String>,
    len: usize,
}

impl Shape {
    /// Creates a shape with row-major strides. `names` must be empty or match the
    /// number of dimensions; unnamed dimensions get an empty name.
    pub fn new(dims: &[usize], names: &[&str]) -> Result<Self, TensorFrameError> {
        if !names.is_empty() && names.len() != dims.len() {
            return Err(TensorFrameError::ShapeMismatch(format!(
                "{} dimension names given for {} dimensions",
                names.len(),
                dims.len()
            )));
        }
        let overflow = || {
            TensorFrameError::ShapeMismatch(format!(
                "shape {:?} has more elements than fit in usize",
                dims
            ))
        };
        let len = checked_len(dims).ok_or_else(overflow)?;
        let strides = row_major_strides(dims).ok_or_else(overflow)?;
        let names = if names.is_empty() {
            vec![String::new(); dims.len()]
        } else {
            names.iter().map(|n| n.to_string()).collect()
        };
        Ok(Self {
            dims: dims.to_vec(),
            strides,
            names,
            len,
        })
    }

    /// Shape without dimension names.
    pub fn unnamed(dims: &[usize]) -> Result<Self, TensorFrameError> {
        Self::new(dims, &[])
    }

    /// Total number of elements. A rank-0 shape holds one element.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_dims(&self) -> usize {
        self.dims.len()
    }

    pub fn dim(&self, i: usize) -> Option<usize> {
        self.dims.get(i).copied()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn dim_names(&self) -> &[String] {
        &self.names
    }

    /// Returns `(rows, cells)`: the outer-most dimension and the number of
    /// elements in each row. Rank-0 shapes are one row of one cell.
    pub fn row_cell_size(&self) -> (usize, usize) {
        match self.dims.split_first() {
            Some((rows, rest)) => (*rows, rest.iter().product()),
            None => (1, 1),
        }
    }

    /// Flat offset of an n-dimensional index.
    pub fn offset(&self, index: &[usize]) -> Result<usize, TensorFrameError> {
        if index.len() != self.dims.len() || index.iter().zip(&self.dims).any(|(i, d)| i >= d) {
            return Err(TensorFrameError::InvalidArgument(format!(
                "index {:?} out of range for shape {}",
                index, self
            )));
        }
        Ok(index.iter().zip(&self.strides).map(|(i, s)| i * s).sum())
    }

    /// n-dimensional index of a flat offset.
    pub fn index(&self, offset: usize) -> Result<Vec<usize>, TensorFrameError> {
        if offset >= self.len() {
            return Err(TensorFrameError::InvalidArgument(format!(
                "offset {} out of range for shape {}",
                offset, self
            )));
        }
        let mut rem = offset;
        Ok(self
            .strides
            .iter()
            .map(|&s| {
                let i = rem / s;
                rem %= s;
                i
            })
            .collect())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (d, n)) in self.dims.iter().zip(&self.names).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if n.is_empty() {
                write!(f, "{}", d)?;
            } else {
                write!(f, "{}: {}", n, d)?;
            }
        }
        write!(f, "]")
    }
}

/// Product of `dims` in order, `None` on overflow.
fn checked_len(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Row-major strides: the last dimension has stride 1. `None` when a stride
/// (or the full element count) overflows `usize`.
pub fn row_major_strides(dims: &[usize]) -> Option<Vec<usize>> {
    let mut strides = vec![1; dims.len()];
    let mut acc: usize = 1;
    for (i, d) in dims.iter().enumerate().rev() {
        strides[i] = acc;
        acc = acc.checked_mul(*d)?;
    }
    Some(strides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[3, 4, 5]), Some(vec![20, 5, 1]));
        assert_eq!(row_major_strides(&[]), Some(Vec::<usize>::new()));
    }

    #[test]
    fn test_offset_index_inverse() {
        let sh = Shape::new(&[3, 4, 5], &["row", "Y", "X"]).unwrap();
        assert_eq!(sh.len(), 60);
        let off = sh.offset(&[2, 1, 3]).unwrap();
        assert_eq!(off, 2 * 20 + 5 + 3);
        assert_eq!(sh.index(off).unwrap(), vec![2, 1, 3]);
        assert!(sh.offset(&[3, 0, 0]).is_err());
        assert!(sh.index(60).is_err());
    }

    #[test]
    fn test_row_cell_size() {
        assert_eq!(Shape::unnamed(&[3, 4, 5]).unwrap().row_cell_size(), (3, 20));
        assert_eq!(Shape::unnamed(&[7]).unwrap().row_cell_size(), (7, 1));
        assert_eq!(Shape::unnamed(&[]).unwrap().row_cell_size(), (1, 1));
    }

    #[test]
    fn test_names_must_match_rank() {
        assert!(Shape::new(&[2, 2], &["Y"]).is_err());
        let sh = Shape::new(&[2, 2], &[]).unwrap();
        assert_eq!(sh.dim_names(), &["".to_string(), "".to_string()]);
        assert_eq!(sh.to_string(), "[2, 2]");
    }

    #[test]
    fn test_zero_sized_dimension() {
        let sh = Shape::unnamed(&[0, 4]).unwrap();
        assert!(sh.is_empty());
        assert_eq!(sh.row_cell_size(), (0, 4));
    }

    #[test]
    fn test_element_count_overflow_is_rejected() {
        let huge = 1usize << (usize::BITS / 2);
        assert!(matches!(
            Shape::new(&[2, huge, huge], &[]),
            Err(TensorFrameError::ShapeMismatch(_))
        ));
        // A zero dimension does not hide an overflowing cell.
        assert!(matches!(
            Shape::unnamed(&[0, huge, huge]),
            Err(TensorFrameError::ShapeMismatch(_))
        ));
        assert!(matches!(
            Shape::unnamed(&[huge, huge, 0]),
            Err(TensorFrameError::ShapeMismatch(_))
        ));
        assert_eq!(row_major_strides(&[huge, huge]), None);
    }
}
