//! Recursive multi-step prediction
//!
//! Each step evaluates the model on the current lag row, emits the rounded
//! prediction, then shifts the raw prediction into the row as the new lag 1.
//! Only the emitted value is rounded; the fed-back value keeps full precision.

use crate::precision::round_to;
use lagcast_spi::{ForecastError, Regressor, Result, MAX_PRECISION};

/// One step of a recursive forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastStep {
    /// Lag row the step was evaluated on, most recent first
    pub features: Vec<f64>,
    /// Unrounded model output, fed back into the next row
    pub raw: f64,
    /// Rounded value returned to the caller
    pub emitted: f64,
}

/// Convert a signed forecast count into a horizon
///
/// Negative counts are rejected with `InvalidInput`.
pub fn forecast_horizon(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| {
        ForecastError::InvalidInput(format!(
            "forecast count must be non-negative, got {}",
            count
        ))
    })
}

/// Produces successive forecasts from a fitted model and a seed row
///
/// # Example
///
/// ```rust
/// use lagcast_core::recursive::RecursivePredictor;
/// use lagcast_spi::LinearModel;
///
/// // Next value = lag 1 + 1
/// let model = LinearModel::new(vec![1.0, 0.0], 1.0);
/// let predictor = RecursivePredictor::new(4).unwrap();
/// let forecast = predictor.forecast(&model, &[5.0, 4.0], 3).unwrap();
/// assert_eq!(forecast, vec![6.0, 7.0, 8.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursivePredictor {
    precision: u32,
}

impl RecursivePredictor {
    /// Create a predictor emitting `precision` decimal digits
    pub fn new(precision: u32) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(ForecastError::invalid_parameter(
                "precision",
                format!("must be at most {}", MAX_PRECISION),
            ));
        }
        Ok(Self { precision })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Forecast `count` steps ahead of `seed`
    pub fn forecast<R>(&self, model: &R, seed: &[f64], count: i64) -> Result<Vec<f64>>
    where
        R: Regressor + ?Sized,
    {
        Ok(self
            .trace(model, seed, count)?
            .into_iter()
            .map(|step| step.emitted)
            .collect())
    }

    /// Forecast `count` steps, keeping the row and raw output of each step
    pub fn trace<R>(&self, model: &R, seed: &[f64], count: i64) -> Result<Vec<ForecastStep>>
    where
        R: Regressor + ?Sized,
    {
        let horizon = forecast_horizon(count)?;
        if seed.len() != model.n_features() {
            return Err(ForecastError::InvalidInput(format!(
                "seed has {} features, model expects {}",
                seed.len(),
                model.n_features()
            )));
        }

        let mut features = seed.to_vec();
        let mut steps = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let raw = model.predict_one(&features)?;
            if !raw.is_finite() {
                return Err(ForecastError::NumericalError(format!(
                    "model produced a non-finite forecast at step {}",
                    steps.len() + 1
                )));
            }

            steps.push(ForecastStep {
                features: features.clone(),
                raw,
                emitted: round_to(raw, self.precision),
            });

            // Oldest lag is last; the new prediction becomes lag 1
            features.pop();
            features.insert(0, raw);
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagcast_spi::LinearModel;

    #[test]
    fn test_negative_count_rejected() {
        let model = LinearModel::new(vec![1.0], 0.0);
        let predictor = RecursivePredictor::new(4).unwrap();
        assert!(matches!(
            predictor.forecast(&model, &[1.0], -1),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let model = LinearModel::new(vec![1.0], 0.0);
        let predictor = RecursivePredictor::new(4).unwrap();
        assert!(predictor.forecast(&model, &[1.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_seed_width_must_match() {
        let model = LinearModel::new(vec![1.0, 1.0, 1.0], 0.0);
        let predictor = RecursivePredictor::new(4).unwrap();
        assert!(matches!(
            predictor.forecast(&model, &[1.0, 2.0], 1),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_feedback_uses_unrounded_value() {
        // y = 0.1 + 0.5 * lag1 + 0.3 * lag2 + 0.2 * lag3
        let model = LinearModel::new(vec![0.5, 0.3, 0.2], 0.1);
        let predictor = RecursivePredictor::new(4).unwrap();
        let seed = [1.23456, 2.34567, 3.45678];

        let steps = predictor.trace(&model, &seed, 3).unwrap();
        assert_eq!(steps.len(), 3);

        let y1 = 0.1 + 0.5 * seed[0] + 0.3 * seed[1] + 0.2 * seed[2];
        assert_eq!(steps[0].features, seed.to_vec());
        assert!((steps[0].raw - y1).abs() < 1e-12);

        let y1 = steps[0].raw;
        assert_eq!(steps[1].features, vec![y1, seed[0], seed[1]]);
        let y2 = 0.1 + 0.5 * y1 + 0.3 * seed[0] + 0.2 * seed[1];
        assert!((steps[1].raw - y2).abs() < 1e-12);

        assert_eq!(steps[2].features, vec![steps[1].raw, y1, seed[0]]);

        for step in &steps {
            assert_eq!(step.emitted, round_to(step.raw, 4));
        }
    }

    #[test]
    fn test_non_finite_prediction_is_numerical_error() {
        let model = LinearModel::new(vec![f64::MAX], f64::MAX);
        let predictor = RecursivePredictor::new(4).unwrap();
        assert!(matches!(
            predictor.forecast(&model, &[f64::MAX], 2),
            Err(ForecastError::NumericalError(_))
        ));
    }

    #[test]
    fn test_precision_limit() {
        assert!(RecursivePredictor::new(MAX_PRECISION).is_ok());
        assert!(RecursivePredictor::new(MAX_PRECISION + 1).is_err());
    }

    #[test]
    fn test_forecast_horizon() {
        assert_eq!(forecast_horizon(0).unwrap(), 0);
        assert_eq!(forecast_horizon(12).unwrap(), 12);
        assert!(forecast_horizon(-3).is_err());
    }
}
