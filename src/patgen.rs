//! Random pattern generators for filling tensor columns with test and demo data.

use crate::error::TensorFrameError;
use crate::tensor::Tensor;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fills every row of `tensor` with exactly `n_on` cells set to `on` and the
/// rest set to `off`, choosing the `on` cells by a fresh permutation per row.
pub fn permuted_binary_rows<R: Rng + ?Sized>(
    tensor: &mut Tensor,
    n_on: usize,
    on: f64,
    off: f64,
    rng: &mut R,
) -> Result<(), TensorFrameError> {
    let (rows, cells) = tensor.shape().row_cell_size();
    if n_on > cells {
        return Err(TensorFrameError::InvalidArgument(format!(
            "{} active cells requested in rows of {}",
            n_on, cells
        )));
    }
    let mut order: Vec<usize> = (0..cells).collect();
    for row in 0..rows {
        order.shuffle(rng);
        for (k, &cell) in order.iter().enumerate() {
            let val = if k < n_on { on } else { off };
            tensor.set_float1d(row * cells + cell, val)?;
        }
    }
    Ok(())
}

/// A `Bool` tensor of shape `dims` with each bit set with probability `p`.
pub fn random_bits<R: Rng + ?Sized>(
    dims: &[usize],
    p: f64,
    rng: &mut R,
) -> Result<Tensor, TensorFrameError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(TensorFrameError::InvalidArgument(format!(
            "probability {} outside [0, 1]",
            p
        )));
    }
    let len: usize = dims.iter().product();
    let bits: Vec<bool> = (0..len).map(|_| rng.random_bool(p)).collect();
    Tensor::from_bools(&bits, dims)
}
