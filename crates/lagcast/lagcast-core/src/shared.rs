//! Thread-safe engine handle
//!
//! Appends, edits and forecasts must not interleave, so every operation
//! takes the same lock and a forecast always fits on a consistent history.

use crate::engine::{ForecastEngine, ForecastOutcome};
use lagcast_spi::{EngineConfig, FitReport, Result};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to one engine shared between threads
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ForecastEngine>>,
}

impl SharedEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::from_engine(ForecastEngine::new(config)?))
    }

    pub fn from_engine(engine: ForecastEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn append_observation(&self, value: f64) -> Result<Option<f64>> {
        self.lock().append_observation(value)
    }

    pub fn update_observation(&self, position: usize, value: f64) -> Result<bool> {
        self.lock().update_observation(position, value)
    }

    pub fn get_history(&self) -> Vec<f64> {
        self.lock().get_history()
    }

    pub fn request_forecast(&self, count: i64) -> Result<Vec<f64>> {
        self.lock().request_forecast(count)
    }

    pub fn forecast_with_report(&self, count: i64) -> Result<ForecastOutcome> {
        self.lock().forecast_with_report(count)
    }

    pub fn latest_forecast(&self) -> Vec<f64> {
        self.lock().latest_forecast().to_vec()
    }

    pub fn last_fit_report(&self) -> Option<FitReport> {
        self.lock().last_fit_report().cloned()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut ForecastEngine) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, ForecastEngine> {
        // Engine operations never leave partial state, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
