//! On-disk model artifact and its loader.
//!
//! An artifact is a JSON document naming the features it was trained on and
//! holding one regressor:
//!
//! ```json
//! {
//!   "feature_names": ["CO AQI Value", "Ozone AQI Value", "Ozone AQI Category",
//!                     "NO2 AQI Value", "PM2.5 AQI Value"],
//!   "model": { "type": "linear", "coefficients": [0.1, 0.6, 3.0, 0.2, 0.9], "intercept": -30.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::AqiModel;
use super::linear::LinearModel;
use super::tree::TreeEnsemble;
use crate::AqiError;
use crate::models::{FEATURE_COUNT, FEATURE_NAMES, ModelRecord};

/// Regressor kinds an artifact can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Regressor {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl Regressor {
    fn validate(&self, num_features: usize) -> crate::Result<()> {
        match self {
            Regressor::Linear(model) => model.validate(num_features),
            Regressor::TreeEnsemble(model) => model.validate(num_features),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Regressor::Linear(_) => "linear",
            Regressor::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

/// A loaded and validated model artifact.
///
/// Only built through [`new`](Self::new), [`from_json`](Self::from_json) or
/// [`load`](Self::load), all of which validate before returning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelArtifact {
    feature_names: Vec<String>,
    model: Regressor,
}

/// Artifact as it appears on disk, before validation.
#[derive(Deserialize)]
struct ArtifactFile {
    feature_names: Vec<String>,
    model: Regressor,
}

impl ModelArtifact {
    /// Build an artifact for the record schema, validating the regressor.
    pub fn new(model: Regressor) -> crate::Result<Self> {
        let artifact = Self {
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            model,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Parse an artifact from JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let file: ArtifactFile = serde_json::from_str(json)
            .map_err(|e| AqiError::model_load(format!("invalid model artifact: {e}")))?;
        let artifact = Self {
            feature_names: file.feature_names,
            model: file.model,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read an artifact from disk.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            AqiError::model_load(format!("cannot read {}: {e}", path.display()))
        })?;
        debug!("Read {} bytes of model artifact", json.len());

        let artifact = Self::from_json(&json)?;
        info!(
            kind = artifact.model.kind(),
            "Loaded model artifact from {}",
            path.display()
        );
        Ok(artifact)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn regressor(&self) -> &Regressor {
        &self.model
    }

    fn validate(&self) -> crate::Result<()> {
        let matches_schema = self.feature_names.len() == FEATURE_COUNT
            && self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .all(|(found, expected)| found == expected);
        if !matches_schema {
            return Err(AqiError::schema_mismatch(
                FEATURE_NAMES,
                self.feature_names.iter().cloned(),
            ));
        }
        self.model.validate(FEATURE_COUNT)
    }
}

impl AqiModel for ModelArtifact {
    fn predict(&self, record: &ModelRecord) -> crate::Result<f64> {
        let features = record.features();
        let prediction = match &self.model {
            Regressor::Linear(model) => model.predict_row(&features),
            Regressor::TreeEnsemble(model) => model.predict_row(&features),
        };
        Ok(prediction)
    }
}
