//! Contract traits for model implementations
//!
//! - [`Regressor`]: a fitted model evaluated one feature row at a time

mod regressor;

pub use regressor::Regressor;
