//! Classifier-and-advisory engine
//!
//! Runs one prediction cycle: validate the readings, assemble the model
//! record, ask the injected model for a prediction, and derive the alert,
//! progress fill and suffocation advisory from it.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::AqiError;
use crate::advisory::PredictionReport;
use crate::models::{MeasurementInput, ModelRecord};
use crate::regressor::AqiModel;

/// Prediction engine shared by the dashboard, the JSON API and the CLI
#[derive(Clone)]
pub struct AdvisoryEngine {
    model: Arc<dyn AqiModel>,
}

impl AdvisoryEngine {
    /// Create an engine around an already loaded model
    pub fn new(model: Arc<dyn AqiModel>) -> Self {
        Self { model }
    }

    /// Evaluate one set of readings
    #[instrument(skip(self))]
    pub fn evaluate(&self, input: &MeasurementInput) -> crate::Result<PredictionReport> {
        input.validate()?;

        let record = ModelRecord::assemble(input);
        let prediction = self.model.predict(&record)?;
        if !prediction.is_finite() {
            warn!("Model returned non-finite prediction {}", prediction);
            return Err(AqiError::prediction(format!(
                "model returned a non-finite value ({prediction})"
            )));
        }

        let report = PredictionReport::from_prediction(prediction);
        debug!(
            prediction,
            band = report.label,
            warning = report.suffocation_warning.is_some(),
            "Prediction cycle complete"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for AdvisoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryEngine").finish_non_exhaustive()
    }
}
