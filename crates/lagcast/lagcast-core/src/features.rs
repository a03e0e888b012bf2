//! Lag-feature construction
//!
//! Turns a raw series into a supervised dataset. Every row's features are
//! the `window` observations immediately preceding its label, most recent
//! first. The same ordering is used for inference seeds.

use lagcast_spi::SupervisedDataset;

/// Build the lagged supervised dataset for `sequence`
///
/// For each index `i` in `window..len`, emits the row
/// `[s[i-1], s[i-2], ..., s[i-window]]` with label `s[i]`. Sequences no
/// longer than `window` yield an empty dataset.
///
/// # Example
///
/// ```rust
/// use lagcast_core::features::build_lagged;
///
/// let ds = build_lagged(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
/// assert_eq!(ds.features, vec![vec![3.0, 2.0, 1.0], vec![4.0, 3.0, 2.0]]);
/// assert_eq!(ds.labels, vec![4.0, 5.0]);
/// ```
pub fn build_lagged(sequence: &[f64], window: usize) -> SupervisedDataset {
    if window == 0 || sequence.len() <= window {
        return SupervisedDataset::empty(window);
    }

    let (features, labels): (Vec<Vec<f64>>, Vec<f64>) = sequence
        .windows(window + 1)
        .map(|w| {
            let row: Vec<f64> = w[..window].iter().rev().copied().collect();
            (row, w[window])
        })
        .unzip();

    SupervisedDataset {
        features,
        labels,
        window,
    }
}

/// Inference seed: the last `window` observations, most recent first
///
/// Returns `None` when the sequence is shorter than `window`.
pub fn seed_features(sequence: &[f64], window: usize) -> Option<Vec<f64>> {
    if sequence.len() < window {
        return None;
    }
    Some(sequence.iter().rev().take(window).copied().collect())
}

/// Number of rows [`build_lagged`] produces for a sequence of `len`
pub fn row_count(len: usize, window: usize) -> usize {
    len.saturating_sub(window)
}
