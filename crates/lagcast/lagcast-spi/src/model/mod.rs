//! Model module containing data structures

mod dataset;
mod engine_config;
mod fit_report;
mod linear_model;

pub use dataset::SupervisedDataset;
pub use engine_config::{EngineConfig, MAX_PRECISION};
pub use fit_report::FitReport;
pub use linear_model::LinearModel;
