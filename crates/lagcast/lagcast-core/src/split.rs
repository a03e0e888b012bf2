//! Seeded train/held-out split
//!
//! Rows are shuffled with a seeded generator, so the same row count, ratio
//! and seed always produce the same partition.

use lagcast_spi::{ForecastError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of each side of a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Rows the model is fitted on, in shuffled order
    pub train: Vec<usize>,
    /// Rows kept aside for diagnostics
    pub held_out: Vec<usize>,
}

/// Number of held-out rows: `ceil(ratio * rows)`
pub fn held_out_size(rows: usize, ratio: f64) -> usize {
    ((ratio * rows as f64).ceil() as usize).min(rows)
}

/// Number of training rows left after holding out
pub fn train_size(rows: usize, ratio: f64) -> usize {
    rows - held_out_size(rows, ratio)
}

/// Smallest row count whose split leaves at least one training row
pub fn min_training_rows(ratio: f64) -> Result<usize> {
    check_ratio(ratio)?;

    let mut rows = 1;
    while train_size(rows, ratio) == 0 {
        rows += 1;
    }
    Ok(rows)
}

/// Shuffle `0..rows` with `seed` and hold out the first `ceil(ratio * rows)`
///
/// # Example
///
/// ```rust
/// use lagcast_core::split::shuffled_split;
///
/// let split = shuffled_split(10, 0.2, 42).unwrap();
/// assert_eq!(split.train.len(), 8);
/// assert_eq!(split.held_out.len(), 2);
/// ```
pub fn shuffled_split(rows: usize, ratio: f64, seed: u64) -> Result<Split> {
    check_ratio(ratio)?;

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(held_out_size(rows, ratio));
    Ok(Split {
        train,
        held_out: indices,
    })
}

fn check_ratio(ratio: f64) -> Result<()> {
    if (0.0..1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(ForecastError::invalid_parameter(
            "holdout_ratio",
            "must be in [0, 1)",
        ))
    }
}
