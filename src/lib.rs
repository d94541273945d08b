//! `aqi-dashboard` - Air quality index prediction dashboard
//!
//! This library loads a pre-trained AQI regressor, turns pollutant readings
//! into model records, and classifies the predicted AQI into severity bands
//! for the dashboard page, the JSON API and the command line.

pub mod advisory;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod regressor;
pub mod web;

// Re-export core types for public API
pub use advisory::{Alert, PredictionReport, SeverityBand, classify};
pub use config::DashboardConfig;
pub use engine::AdvisoryEngine;
pub use error::AqiError;
pub use models::{AqiCategory, MeasurementInput, ModelRecord};
pub use regressor::{AqiModel, ModelArtifact};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AqiError>;
