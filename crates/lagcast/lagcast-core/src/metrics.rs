//! Fit accuracy metrics
//!
//! Used for the diagnostics in a `FitReport`. Mismatched or empty inputs
//! yield `NaN` rather than an error.

/// Mean Absolute Error (MAE)
///
/// # Example
///
/// ```rust
/// use lagcast_core::metrics::mae;
///
/// let error = mae(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]);
/// assert!((error - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Mean Squared Error (MSE)
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// R-squared (Coefficient of Determination)
///
/// 1.0 = perfect, 0.0 = same as mean prediction, negative = worse than mean.
/// Constant targets report 1.0.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;

    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot < 1e-10 {
        return 1.0;
    }

    1.0 - ss_res / ss_tot
}
