use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AqiError;

/// Display labels of every [`AqiCategory`], in model-index order.
pub const AQI_CATEGORY_LABELS: [&str; 6] = [
    "Good",
    "Moderate",
    "Unhealthy for Sensitive Groups",
    "Unhealthy",
    "Very Unhealthy",
    "Hazardous",
];

/// Ozone AQI category as selected in the dashboard.
///
/// The zero-based position of a variant is fed to the model as a numeric
/// feature, so the declaration order must match the encoding the model was
/// trained with. Reordering the variants silently changes predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AqiCategory {
    #[default]
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// All categories in model-index order.
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthyForSensitiveGroups,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    /// Zero-based index used as the model feature.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`AqiCategory::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label, as shown in the category selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        AQI_CATEGORY_LABELS[self.index()]
    }

    /// Look a category up by its exact label.
    pub fn from_label(label: &str) -> crate::Result<Self> {
        let index = category_to_numeric(label, &AQI_CATEGORY_LABELS)?;
        Ok(Self::ALL[index])
    }
}

/// Position of `category` within `categories`.
///
/// Fails with a validation error when the label is not present.
pub fn category_to_numeric(category: &str, categories: &[&str]) -> crate::Result<usize> {
    categories
        .iter()
        .position(|candidate| *candidate == category)
        .ok_or_else(|| {
            AqiError::validation(format!(
                "Unknown AQI category '{}'. Must be one of: {}",
                category,
                categories.join(", ")
            ))
        })
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AqiCategory {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Serialize for AqiCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AqiCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label).map_err(serde::de::Error::custom)
    }
}
