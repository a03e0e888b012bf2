//! Lagcast Consumer API
//!
//! Builder APIs for constructing forecasting engines, plus re-exports from
//! SPI and core for convenience.

// Re-export from core
pub use lagcast_core::{
    engine, features, history, metrics, ols, precision, recursive, shared, split, trainer,
    ForecastEngine, ForecastOutcome, ForecastStep, HistoryBuffer, ModelTrainer,
    RecursivePredictor, SharedEngine, TrainedModel,
};

// Re-export from SPI
pub use lagcast_spi::{
    EngineConfig, FitReport, ForecastError, LinearModel, Regressor, Result, SupervisedDataset,
    MAX_PRECISION,
};

/// Step-by-step construction of a [`ForecastEngine`]
///
/// Starts from [`EngineConfig::default`]; `build` validates the result.
///
/// # Example
///
/// ```rust
/// use lagcast_api::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .with_capacity(50)
///     .with_window(5)
///     .build()
///     .unwrap();
/// assert_eq!(engine.min_observations(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.config.window = window;
        self
    }

    pub fn with_holdout_ratio(mut self, ratio: f64) -> Self {
        self.config.holdout_ratio = ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.config.precision = precision;
        self
    }

    /// The configuration built so far, unvalidated
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn build(self) -> Result<ForecastEngine> {
        ForecastEngine::new(self.config)
    }

    pub fn build_shared(self) -> Result<SharedEngine> {
        SharedEngine::new(self.config)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::EngineBuilder;
    pub use lagcast_core::prelude::*;
}
