//! Fit diagnostics model

use serde::{Deserialize, Serialize};

/// Diagnostics gathered while fitting a model
///
/// The held-out metrics are informational only; they never influence the fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Rows the model was fitted on
    pub train_rows: usize,
    /// Rows held out by the split
    pub held_out_rows: usize,
    /// In-sample coefficient of determination
    pub r_squared: f64,
    /// Mean absolute error on the held-out rows
    pub held_out_mae: Option<f64>,
    /// Root mean squared error on the held-out rows
    pub held_out_rmse: Option<f64>,
}

impl FitReport {
    /// One-line summary for logs and terminals
    pub fn summary(&self) -> String {
        let held_out = match (self.held_out_mae, self.held_out_rmse) {
            (Some(mae), Some(rmse)) => format!("held-out MAE {:.4}, RMSE {:.4}", mae, rmse),
            _ => "no held-out rows".to_string(),
        };
        format!(
            "{} train rows, {} held out, R^2 {:.4}, {}",
            self.train_rows, self.held_out_rows, self.r_squared, held_out
        )
    }
}
