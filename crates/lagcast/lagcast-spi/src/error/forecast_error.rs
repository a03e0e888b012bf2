//! Forecast error types
//!
//! Defines the standardized error type for all engine operations.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while recording observations or forecasting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Malformed or non-finite value, or a negative forecast count
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Edit targets a position outside the current history
    #[error("Index error: position {position} is out of bounds for history of length {len}")]
    IndexOutOfBounds { position: usize, len: usize },

    /// Not enough observations to fit a model
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

impl ForecastError {
    /// Shorthand for [`ForecastError::InvalidParameter`]
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from the caller's input rather than the data or the solver
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::IndexOutOfBounds { .. } | Self::InvalidParameter { .. }
        )
    }
}
