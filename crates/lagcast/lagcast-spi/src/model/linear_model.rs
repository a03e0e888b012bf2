//! Linear model

use crate::contract::Regressor;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Fitted linear map from a lag-feature row to a scalar
///
/// `prediction = intercept + dot(coefficients, features)`
///
/// # Example
///
/// ```rust
/// use lagcast_spi::{LinearModel, Regressor};
///
/// let model = LinearModel::new(vec![0.5, 0.25, 0.25], 1.0);
/// let y = model.predict_one(&[4.0, 2.0, 2.0]).unwrap();
/// assert!((y - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Coefficient per lag, lag 1 first
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_one(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(ForecastError::InvalidInput(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();

        Ok(self.intercept + dot)
    }
}
