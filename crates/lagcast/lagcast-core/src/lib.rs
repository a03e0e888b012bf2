//! Lagcast Core
//!
//! Core implementations of the recursive lag-regression forecasting engine,
//! leaf-first:
//!
//! - [`history`]: bounded FIFO store of observations
//! - [`features`]: lagged supervised dataset construction
//! - [`split`], [`ols`], [`metrics`], [`trainer`]: seeded split and OLS fit
//! - [`recursive`], [`precision`]: multi-step forecasting with feed-back
//! - [`engine`], [`shared`]: the boundary operations and a thread-safe handle
//!
//! ## Example
//!
//! ```rust
//! use lagcast_core::prelude::*;
//!
//! let mut engine = ForecastEngine::new(EngineConfig::default()).unwrap();
//! for value in [1.42, 2.10, 1.05, 3.77, 1.88, 1.23] {
//!     engine.append_observation(value).unwrap();
//! }
//! let forecast = engine.request_forecast(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

pub mod engine;
pub mod features;
pub mod history;
pub mod metrics;
pub mod ols;
pub mod precision;
pub mod recursive;
pub mod shared;
pub mod split;
pub mod trainer;

// Re-export from SPI
pub use lagcast_spi::{
    EngineConfig, FitReport, ForecastError, LinearModel, Regressor, Result, SupervisedDataset,
};

// Re-export main types
pub use engine::{ForecastEngine, ForecastOutcome};
pub use history::HistoryBuffer;
pub use recursive::{ForecastStep, RecursivePredictor};
pub use shared::SharedEngine;
pub use trainer::{ModelTrainer, TrainedModel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{ForecastEngine, ForecastOutcome};
    pub use crate::features::{build_lagged, seed_features};
    pub use crate::history::HistoryBuffer;
    pub use crate::recursive::{ForecastStep, RecursivePredictor};
    pub use crate::shared::SharedEngine;
    pub use crate::trainer::{ModelTrainer, TrainedModel};
    pub use lagcast_spi::{
        EngineConfig, FitReport, ForecastError, LinearModel, Regressor, Result,
        SupervisedDataset,
    };
}
