//! Regressor trait for fitted models
//!
//! The recursive predictor only needs to evaluate a fitted model on one
//! feature row at a time, so that is all this contract asks for.

use crate::error::Result;

/// A fitted model mapping a feature row to a scalar prediction
///
/// Feature rows are ordered most-recent-first: `features[0]` is lag 1,
/// `features[1]` is lag 2, and so on.
///
/// # Example
///
/// ```rust,ignore
/// use lagcast_spi::Regressor;
///
/// fn one_step<R: Regressor>(model: &R, lags: &[f64]) -> lagcast_spi::Result<f64> {
///     model.predict_one(lags)
/// }
/// ```
pub trait Regressor {
    /// Number of features a row must contain
    fn n_features(&self) -> usize;

    /// Predict the value that follows the given feature row
    ///
    /// # Returns
    ///
    /// The raw (unrounded) prediction, or `InvalidInput` when the row length
    /// does not match [`Regressor::n_features`]
    fn predict_one(&self, features: &[f64]) -> Result<f64>;
}
