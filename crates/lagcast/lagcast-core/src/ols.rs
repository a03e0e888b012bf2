//! Ordinary least squares with an intercept
//!
//! Fits `y = intercept + X @ coefficients` by centring features and labels,
//! then solving the centred system with the minimum-norm SVD solution.
//! Rank-deficient and under-determined systems (fewer rows than features)
//! therefore still produce a model instead of failing.

use lagcast_spi::{ForecastError, LinearModel, Result};
use nalgebra::{DMatrix, DVector};

/// Iteration cap for the SVD before it is reported as non-convergent
const SVD_MAX_ITERATIONS: usize = 10_000;

/// Fit OLS on `features` (one row per observation) and `labels`
///
/// # Example
///
/// ```rust
/// use lagcast_core::ols::fit_ols;
///
/// let features = vec![vec![0.0], vec![1.0], vec![2.0]];
/// let labels = vec![1.0, 3.0, 5.0];
/// let model = fit_ols(&features, &labels).unwrap();
/// assert!((model.coefficients()[0] - 2.0).abs() < 1e-9);
/// assert!((model.intercept() - 1.0).abs() < 1e-9);
/// ```
pub fn fit_ols(features: &[Vec<f64>], labels: &[f64]) -> Result<LinearModel> {
    let n = labels.len();
    if n == 0 {
        return Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if features.len() != n {
        return Err(ForecastError::InvalidInput(format!(
            "{} feature rows for {} labels",
            features.len(),
            n
        )));
    }

    let k = features[0].len();
    if k == 0 {
        return Err(ForecastError::InvalidInput(
            "feature rows must not be empty".to_string(),
        ));
    }
    if let Some(row) = features.iter().find(|row| row.len() != k) {
        return Err(ForecastError::InvalidInput(format!(
            "ragged feature rows: expected {} columns, found {}",
            k,
            row.len()
        )));
    }
    if labels.iter().chain(features.iter().flatten()).any(|v| !v.is_finite()) {
        return Err(ForecastError::InvalidInput(
            "training data must be finite".to_string(),
        ));
    }

    let x_mean: Vec<f64> = (0..k)
        .map(|j| features.iter().map(|row| row[j]).sum::<f64>() / n as f64)
        .collect();
    let y_mean = labels.iter().sum::<f64>() / n as f64;

    let x = DMatrix::from_fn(n, k, |i, j| features[i][j] - x_mean[j]);
    let y = DVector::from_iterator(n, labels.iter().map(|v| v - y_mean));

    let svd = x
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| ForecastError::NumericalError("SVD did not converge".to_string()))?;

    // Singular values below this are treated as zero (minimum-norm solution)
    let s_max = svd.singular_values.iter().copied().fold(0.0, f64::max);
    let tolerance = f64::EPSILON * n.max(k) as f64 * s_max;

    let beta = svd
        .solve(&y, tolerance)
        .map_err(|e| ForecastError::NumericalError(e.to_string()))?;

    let coefficients: Vec<f64> = beta.iter().copied().collect();
    let intercept = y_mean
        - coefficients
            .iter()
            .zip(&x_mean)
            .map(|(c, m)| c * m)
            .sum::<f64>();

    if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
        return Err(ForecastError::NumericalError(
            "least-squares solution is not finite".to_string(),
        ));
    }

    Ok(LinearModel::new(coefficients, intercept))
}
