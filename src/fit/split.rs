//! Seeded train/validation split.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::{EvalError, EvalResult};

/// Index partition of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(n * ratio)` indices.
///
/// Both sides keep at least one index. Index lists are returned sorted so
/// the training data keeps its original relative order.
pub fn split_indices(n: usize, ratio: f64, seed: u64) -> EvalResult<Split> {
    if n < 2 {
        return Err(EvalError::InsufficientData {
            stage: "train/validation split",
            available: n,
            required: 2,
        });
    }

    let n_validation = ((n as f64 * ratio).ceil() as usize).clamp(1, n - 1);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(&mut rng);

    let mut validation = idx[..n_validation].to_vec();
    let mut train = idx[n_validation..].to_vec();
    validation.sort_unstable();
    train.sort_unstable();

    Ok(Split { train, validation })
}
