//! Engine configuration model

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Largest supported number of decimal digits in emitted forecasts
pub const MAX_PRECISION: u32 = 12;

/// Configuration for a forecasting engine
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of retained observations
    pub capacity: usize,
    /// Number of lagged observations per feature row
    pub window: usize,
    /// Fraction of rows held out from the fit (0.0 fits on every row)
    pub holdout_ratio: f64,
    /// Seed for the train/held-out shuffle
    pub seed: u64,
    /// Decimal digits kept in emitted forecasts
    pub precision: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            window: 3,
            holdout_ratio: 0.2,
            seed: 42,
            precision: 4,
        }
    }
}

impl EngineConfig {
    /// Check every field, returning the first violation
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 1 {
            return Err(ForecastError::invalid_parameter(
                "capacity",
                "must be at least 1",
            ));
        }
        if self.window < 1 {
            return Err(ForecastError::invalid_parameter("window", "must be at least 1"));
        }
        if self.window >= self.capacity {
            return Err(ForecastError::invalid_parameter(
                "window",
                format!("must be smaller than capacity ({})", self.capacity),
            ));
        }
        if !(0.0..1.0).contains(&self.holdout_ratio) {
            return Err(ForecastError::invalid_parameter(
                "holdout_ratio",
                "must be in [0, 1)",
            ));
        }
        if self.precision > MAX_PRECISION {
            return Err(ForecastError::invalid_parameter(
                "precision",
                format!("must be at most {}", MAX_PRECISION),
            ));
        }
        Ok(())
    }
}
