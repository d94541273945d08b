//! Linear regression model (coefficients + intercept).

use serde::{Deserialize, Serialize};

use crate::AqiError;

/// Linear regressor over the record features.
///
/// ```text
/// prediction = intercept + Σ coefficients[i] * features[i]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One coefficient per feature, in schema order.
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Check the model is usable with `num_features` inputs.
    pub fn validate(&self, num_features: usize) -> crate::Result<()> {
        if self.coefficients.len() != num_features {
            return Err(AqiError::model_load(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                num_features
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AqiError::model_load(
                "linear model contains non-finite parameters",
            ));
        }
        Ok(())
    }

    pub(crate) fn predict_row(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.coefficients.len());
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (coef, value)| acc + coef * value)
    }
}
