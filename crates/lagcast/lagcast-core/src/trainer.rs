//! Model trainer
//!
//! Splits a supervised dataset into training and held-out rows with a fixed
//! seed, fits OLS on the training rows only and reports diagnostics for both.

use crate::metrics;
use crate::ols::fit_ols;
use crate::split::{min_training_rows, shuffled_split};
use lagcast_spi::{
    EngineConfig, FitReport, ForecastError, LinearModel, Regressor, Result, SupervisedDataset,
};

/// A fitted model and the diagnostics of its fit
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub model: LinearModel,
    pub report: FitReport,
}

/// Fits a fresh linear model on every call
///
/// # Example
///
/// ```rust
/// use lagcast_core::features::build_lagged;
/// use lagcast_core::trainer::ModelTrainer;
///
/// let dataset = build_lagged(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
/// let trained = ModelTrainer::new(0.2, 42).unwrap().fit(&dataset).unwrap();
/// assert_eq!(trained.report.train_rows, 1);
/// assert_eq!(trained.report.held_out_rows, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTrainer {
    holdout_ratio: f64,
    seed: u64,
}

impl ModelTrainer {
    pub fn new(holdout_ratio: f64, seed: u64) -> Result<Self> {
        // Rejects ratios outside [0, 1)
        min_training_rows(holdout_ratio)?;
        Ok(Self {
            holdout_ratio,
            seed,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(config.holdout_ratio, config.seed)
    }

    pub fn holdout_ratio(&self) -> f64 {
        self.holdout_ratio
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Smallest dataset this trainer can fit
    pub fn min_rows(&self) -> usize {
        // The ratio was validated in `new`
        min_training_rows(self.holdout_ratio).unwrap_or(1)
    }

    /// Split, fit on the training rows and evaluate
    ///
    /// Fails with `InsufficientData` (counted in rows) when the split leaves
    /// no training rows.
    pub fn fit(&self, dataset: &SupervisedDataset) -> Result<TrainedModel> {
        let rows = dataset.len();
        let split = shuffled_split(rows, self.holdout_ratio, self.seed)?;
        if split.train.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: self.min_rows(),
                actual: rows,
            });
        }

        let train = dataset.select(&split.train);
        let held_out = dataset.select(&split.held_out);

        let model = fit_ols(&train.features, &train.labels)?;

        let fitted = predict_rows(&model, &train)?;
        let r_squared = metrics::r_squared(&train.labels, &fitted);

        let (held_out_mae, held_out_rmse) = if held_out.is_empty() {
            (None, None)
        } else {
            let predicted = predict_rows(&model, &held_out)?;
            (
                Some(metrics::mae(&held_out.labels, &predicted)),
                Some(metrics::rmse(&held_out.labels, &predicted)),
            )
        };

        Ok(TrainedModel {
            model,
            report: FitReport {
                train_rows: train.len(),
                held_out_rows: held_out.len(),
                r_squared,
                held_out_mae,
                held_out_rmse,
            },
        })
    }
}

fn predict_rows(model: &LinearModel, dataset: &SupervisedDataset) -> Result<Vec<f64>> {
    dataset
        .features
        .iter()
        .map(|row| model.predict_one(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::build_lagged;

    fn series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 1.0 + ((i * 7) % 5) as f64 * 0.37 + (i as f64 * 0.3).sin())
            .collect()
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        assert!(ModelTrainer::new(1.0, 42).is_err());
        assert!(ModelTrainer::new(-0.1, 42).is_err());
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let dataset = build_lagged(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(dataset.len(), 1);
        let err = ModelTrainer::new(0.2, 42).unwrap().fit(&dataset).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_dataset_is_insufficient() {
        let dataset = build_lagged(&[1.0, 2.0], 3);
        assert!(matches!(
            ModelTrainer::new(0.2, 42).unwrap().fit(&dataset),
            Err(ForecastError::InsufficientData { actual: 0, .. })
        ));
    }

    #[test]
    fn test_zero_ratio_fits_single_row() {
        let dataset = build_lagged(&[1.0, 2.0, 3.0, 4.0], 3);
        let trained = ModelTrainer::new(0.0, 42).unwrap().fit(&dataset).unwrap();
        assert_eq!(trained.report.train_rows, 1);
        assert_eq!(trained.report.held_out_rows, 0);
        assert!(trained.report.held_out_mae.is_none());
        assert!((trained.model.intercept() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_counts() {
        let dataset = build_lagged(&series(20), 3);
        assert_eq!(dataset.len(), 17);
        let trained = ModelTrainer::new(0.2, 42).unwrap().fit(&dataset).unwrap();
        assert_eq!(trained.report.held_out_rows, 4);
        assert_eq!(trained.report.train_rows, 13);
        assert!(trained.report.held_out_mae.is_some());
        assert!(trained.report.held_out_rmse.unwrap() + 1e-12 >= trained.report.held_out_mae.unwrap());
        assert_eq!(trained.model.coefficients().len(), 3);
    }

    #[test]
    fn test_same_seed_same_model() {
        let dataset = build_lagged(&series(15), 3);
        let trainer = ModelTrainer::new(0.2, 42).unwrap();
        assert_eq!(trainer.fit(&dataset).unwrap(), trainer.fit(&dataset).unwrap());
    }

    #[test]
    fn test_two_rows_train_on_one() {
        let dataset = build_lagged(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        let trained = ModelTrainer::new(0.2, 42).unwrap().fit(&dataset).unwrap();
        // One training row: the model is that row's label
        let intercept = trained.model.intercept();
        assert!((intercept - 4.0).abs() < 1e-12 || (intercept - 5.0).abs() < 1e-12);
        assert!(trained.model.coefficients().iter().all(|c| c.abs() < 1e-12));
    }
}
