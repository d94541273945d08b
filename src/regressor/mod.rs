//! Prediction model module
//!
//! The dashboard treats the trained regressor as an opaque collaborator
//! behind [`AqiModel`]. The shipped implementation is [`ModelArtifact`], a
//! JSON artifact holding either a linear model or a tree ensemble, checked
//! against the record schema when it is loaded.

pub mod artifact;
pub mod linear;
pub mod tree;

pub use artifact::{ModelArtifact, Regressor};
pub use linear::LinearModel;
pub use tree::{Aggregation, RegressionTree, TreeEnsemble};

use crate::models::ModelRecord;

/// A trained AQI regressor.
///
/// Loaded once at startup and shared read-only between requests.
pub trait AqiModel: Send + Sync {
    /// Predict the AQI for one assembled record.
    fn predict(&self, record: &ModelRecord) -> crate::Result<f64>;
}
