//! Forecasting engine
//!
//! The boundary used by the presentation layer. Every forecast request is a
//! stateless run over the current history: build lag features, fit a fresh
//! model, then forecast recursively. A failed request leaves the history,
//! the latest forecast and the last fit report exactly as they were.

use crate::features::{build_lagged, seed_features};
use crate::history::HistoryBuffer;
use crate::recursive::{forecast_horizon, RecursivePredictor};
use crate::trainer::ModelTrainer;
use lagcast_spi::{EngineConfig, FitReport, ForecastError, LinearModel, Result};
use serde::{Deserialize, Serialize};

/// Everything produced by one successful forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutcome {
    /// Rounded forecasts, next value first
    pub forecast: Vec<f64>,
    /// Model fitted for this request
    pub model: LinearModel,
    /// Diagnostics of the fit
    pub report: FitReport,
}

/// History buffer plus the fit/forecast pipeline
///
/// # Example
///
/// ```rust
/// use lagcast_core::engine::ForecastEngine;
/// use lagcast_spi::EngineConfig;
///
/// let mut engine = ForecastEngine::new(EngineConfig::default()).unwrap();
/// for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     engine.append_observation(value).unwrap();
/// }
/// let forecast = engine.request_forecast(2).unwrap();
/// assert_eq!(forecast.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: EngineConfig,
    history: HistoryBuffer,
    trainer: ModelTrainer,
    predictor: RecursivePredictor,
    latest_forecast: Vec<f64>,
    last_report: Option<FitReport>,
}

impl ForecastEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            history: HistoryBuffer::new(config.capacity)?,
            trainer: ModelTrainer::from_config(&config)?,
            predictor: RecursivePredictor::new(config.precision)?,
            config,
            latest_forecast: Vec::new(),
            last_report: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Record a new observation
    ///
    /// # Returns
    ///
    /// The observation evicted to stay within capacity, if any.
    pub fn append_observation(&mut self, value: f64) -> Result<Option<f64>> {
        self.history.append(value)
    }

    /// Correct a previously recorded observation
    ///
    /// # Returns
    ///
    /// `true` if the stored value changed.
    pub fn update_observation(&mut self, position: usize, value: f64) -> Result<bool> {
        self.history.update(position, value)
    }

    /// Current history, oldest first
    pub fn get_history(&self) -> Vec<f64> {
        self.history.snapshot()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Fit on the current history and forecast `count` values
    pub fn request_forecast(&mut self, count: i64) -> Result<Vec<f64>> {
        self.forecast_with_report(count).map(|outcome| outcome.forecast)
    }

    /// Like [`ForecastEngine::request_forecast`], also returning the model and diagnostics
    pub fn forecast_with_report(&mut self, count: i64) -> Result<ForecastOutcome> {
        forecast_horizon(count)?;

        let required = self.min_observations();
        let sequence = self.history.snapshot();
        if sequence.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: sequence.len(),
            });
        }

        let window = self.config.window;
        let dataset = build_lagged(&sequence, window);
        let trained = self.trainer.fit(&dataset)?;

        let seed = seed_features(&sequence, window).ok_or(ForecastError::InsufficientData {
            required: window,
            actual: sequence.len(),
        })?;
        let forecast = self.predictor.forecast(&trained.model, &seed, count)?;

        self.latest_forecast = forecast.clone();
        self.last_report = Some(trained.report.clone());

        Ok(ForecastOutcome {
            forecast,
            model: trained.model,
            report: trained.report,
        })
    }

    /// History length needed before a forecast can succeed
    pub fn min_observations(&self) -> usize {
        self.config.window + self.trainer.min_rows()
    }

    /// Forecast from the most recent successful request
    pub fn latest_forecast(&self) -> &[f64] {
        &self.latest_forecast
    }

    /// Fit diagnostics from the most recent successful request
    pub fn last_fit_report(&self) -> Option<&FitReport> {
        self.last_report.as_ref()
    }

    /// Drop all observations and any previous forecast
    pub fn reset(&mut self) {
        self.history.clear();
        self.latest_forecast.clear();
        self.last_report = None;
    }
}
