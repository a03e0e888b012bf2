//! Lagcast Service Provider Interface
//!
//! Defines the error taxonomy, the model contract and the plain data models
//! shared by every part of the lagcast forecasting engine.
//!
//! - [`Regressor`]: a fitted model that maps one feature row to a scalar
//! - [`ForecastError`]: standardized error type for all engine operations
//! - [`Result`]: convenient result type alias
//! - [`SupervisedDataset`], [`LinearModel`], [`FitReport`], [`EngineConfig`]: models

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::Regressor;
pub use error::{ForecastError, Result};
pub use model::{EngineConfig, FitReport, LinearModel, SupervisedDataset, MAX_PRECISION};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_limit_at_root() {
        assert_eq!(MAX_PRECISION, 12);
        let config = EngineConfig {
            precision: MAX_PRECISION,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
