//! Severity classification and derived display values
//!
//! Maps a continuous AQI prediction to one of six severity bands, and derives
//! the progress-bar fill and the suffocation advisory shown next to it.

use serde::Serialize;
use std::fmt;

/// AQI that fills the progress bar completely.
pub const PROGRESS_SCALE_MAX: f64 = 510.0;

/// Predictions at or above this value raise the suffocation advisory.
///
/// Not aligned with the band boundaries: everything from 200 up to 300 is
/// "Poor" or "Unhealthy" and already warns.
pub const SUFFOCATION_THRESHOLD: f64 = 200.0;

pub const SUFFOCATION_WARNING: &str =
    "Warning: The air quality is unhealthy and may cause suffocation risks!";

/// Severity band of a predicted AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SeverityBand {
    Good,
    Moderate,
    Poor,
    Unhealthy,
    Severe,
    Hazardous,
}

impl SeverityBand {
    /// Inclusive upper bound of each band, ascending. Hazardous is open-ended.
    const UPPER_BOUNDS: [(f64, SeverityBand); 5] = [
        (50.0, SeverityBand::Good),
        (100.0, SeverityBand::Moderate),
        (200.0, SeverityBand::Poor),
        (300.0, SeverityBand::Unhealthy),
        (400.0, SeverityBand::Severe),
    ];

    /// Band containing `value`. Total over all floats; NaN lands in Hazardous.
    #[must_use]
    pub fn for_value(value: f64) -> Self {
        Self::UPPER_BOUNDS
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map_or(SeverityBand::Hazardous, |(_, band)| *band)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Good => "Good",
            SeverityBand::Moderate => "Moderate",
            SeverityBand::Poor => "Poor",
            SeverityBand::Unhealthy => "Unhealthy",
            SeverityBand::Severe => "Severe",
            SeverityBand::Hazardous => "Hazardous",
        }
    }

    /// Hex color used for the alert and the progress bar
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            SeverityBand::Good => "#2ecc71",
            SeverityBand::Moderate => "#f1c40f",
            SeverityBand::Poor => "#e67e22",
            SeverityBand::Unhealthy => "#e74c3c",
            SeverityBand::Severe => "#8e44ad",
            SeverityBand::Hazardous => "#c0392b",
        }
    }

    #[must_use]
    pub fn message(self, value: f64) -> String {
        format!(
            "{} Air Quality: Predicted AQI Value is {:.2}",
            self.label(),
            value
        )
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified alert for one prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub band: SeverityBand,
    pub label: &'static str,
    pub message: String,
    pub color: &'static str,
}

/// Classify a predicted AQI value into its alert.
#[must_use]
pub fn classify(value: f64) -> Alert {
    let band = SeverityBand::for_value(value);
    Alert {
        band,
        label: band.label(),
        message: band.message(value),
        color: band.color(),
    }
}

/// Progress-bar fill for a prediction, capped at 100.
///
/// Negative predictions give a negative percentage.
#[must_use]
pub fn progress_percentage(value: f64) -> f64 {
    (value / PROGRESS_SCALE_MAX * 100.0).min(100.0)
}

/// Suffocation warning text, present iff `value >= 200`.
#[must_use]
pub fn suffocation_advisory(value: f64) -> Option<&'static str> {
    (value >= SUFFOCATION_THRESHOLD).then_some(SUFFOCATION_WARNING)
}

/// Everything the dashboard shows for one prediction cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub prediction: f64,
    pub band: SeverityBand,
    pub label: &'static str,
    pub message: String,
    pub color: &'static str,
    pub progress_percentage: f64,
    pub suffocation_warning: Option<&'static str>,
}

impl PredictionReport {
    #[must_use]
    pub fn from_prediction(prediction: f64) -> Self {
        let alert = classify(prediction);
        Self {
            prediction,
            band: alert.band,
            label: alert.label,
            message: alert.message,
            color: alert.color,
            progress_percentage: progress_percentage(prediction),
            suffocation_warning: suffocation_advisory(prediction),
        }
    }
}
