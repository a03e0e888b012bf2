//! Lagcast Facade
//!
//! High-level API for the forecasting engine. Re-exports all public types
//! from the lagcast stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use lagcast_facade::prelude::*;
//!
//! let mut engine = EngineBuilder::new().build().unwrap();
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     engine.append_observation(value).unwrap();
//! }
//! assert_eq!(engine.request_forecast(2).unwrap().len(), 2);
//! ```

// Re-export everything from API (which includes SPI and core)
pub use lagcast_api::*;

// Re-export SPI contracts
pub use lagcast_spi::{contract, error, model};
