//! Error types for engine operations
//!
//! This module provides the [`ForecastError`] enum and [`Result`] type alias
//! used by the history buffer, the trainer, the predictor and the engine.

mod forecast_error;

pub use forecast_error::{ForecastError, Result};
