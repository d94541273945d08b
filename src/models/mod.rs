//! Data models for the AQI dashboard
//!
//! This module contains the input-side domain models organized by concern:
//! - Category: the ozone AQI category enumeration and its model encoding
//! - Measurement: user readings and the slider bounds that constrain them
//! - Record: the fixed-schema feature record handed to the model

pub mod category;
pub mod measurement;
pub mod record;

// Re-export all public types for convenient access
pub use category::{AQI_CATEGORY_LABELS, AqiCategory, category_to_numeric};
pub use measurement::{CONTROLS, ControlSpec, MeasurementInput};
pub use record::{FEATURE_COUNT, FEATURE_NAMES, ModelRecord};
