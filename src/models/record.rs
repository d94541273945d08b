//! Fixed-schema record handed to the prediction model

use serde::Serialize;

use super::measurement::MeasurementInput;

/// Number of features in a [`ModelRecord`]
pub const FEATURE_COUNT: usize = 5;

/// Feature names in the order the model was trained on
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "CO AQI Value",
    "Ozone AQI Value",
    "Ozone AQI Category",
    "NO2 AQI Value",
    "PM2.5 AQI Value",
];

/// Model input assembled from one [`MeasurementInput`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelRecord {
    pub co_aqi: f64,
    pub ozone_aqi: f64,
    /// Zero-based index of the ozone category
    pub ozone_category: f64,
    pub no2_aqi: f64,
    pub pm25_aqi: f64,
}

impl ModelRecord {
    pub fn assemble(input: &MeasurementInput) -> Self {
        Self {
            co_aqi: input.co_aqi,
            ozone_aqi: input.ozone_aqi,
            ozone_category: input.ozone_category.index() as f64,
            no2_aqi: input.no2_aqi,
            pm25_aqi: input.pm25_aqi,
        }
    }

    /// Feature values ordered as [`FEATURE_NAMES`]
    #[must_use]
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.co_aqi,
            self.ozone_aqi,
            self.ozone_category,
            self.no2_aqi,
            self.pm25_aqi,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AqiCategory;

    #[test]
    fn test_assemble_encodes_category_index() {
        let input = MeasurementInput {
            co_aqi: 350.0,
            ozone_aqi: 50.0,
            ozone_category: AqiCategory::Good,
            no2_aqi: 50.0,
            pm25_aqi: 50.0,
        };
        let record = ModelRecord::assemble(&input);
        assert_eq!(record.features(), [350.0, 50.0, 0.0, 50.0, 50.0]);
    }

    #[test]
    fn test_features_follow_schema_order() {
        let input = MeasurementInput {
            co_aqi: 400.0,
            ozone_aqi: 1.0,
            ozone_category: AqiCategory::VeryUnhealthy,
            no2_aqi: 2.0,
            pm25_aqi: 3.0,
        };
        let features = ModelRecord::assemble(&input).features();
        let by_name: Vec<(&str, f64)> = FEATURE_NAMES.iter().copied().zip(features).collect();
        assert_eq!(
            by_name,
            vec![
                ("CO AQI Value", 400.0),
                ("Ozone AQI Value", 1.0),
                ("Ozone AQI Category", 4.0),
                ("NO2 AQI Value", 2.0),
                ("PM2.5 AQI Value", 3.0),
            ]
        );
    }
}
