use serde::{Deserialize, Serialize};

use super::category::AqiCategory;
use crate::AqiError;

/// Bounds and default of one dashboard slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlSpec {
    /// Form field name, matching the serialized [`MeasurementInput`] field
    pub name: &'static str,
    /// Label shown above the slider
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ControlSpec {
    /// Whether `value` lies within the slider bounds (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, value: f64) -> crate::Result<()> {
        if !value.is_finite() {
            return Err(AqiError::validation(format!(
                "{} must be a finite number",
                self.label
            )));
        }
        if !self.contains(value) {
            return Err(AqiError::validation(format!(
                "{} must be between {} and {}, got {}",
                self.label, self.min, self.max, value
            )));
        }
        Ok(())
    }
}

pub const CO_CONTROL: ControlSpec = ControlSpec {
    name: "co_aqi_value",
    label: "CO AQI Value",
    min: 300.0,
    max: 1000.0,
    step: 10.0,
    default: 350.0,
};

pub const OZONE_CONTROL: ControlSpec = ControlSpec {
    name: "ozone_aqi_value",
    label: "Ozone AQI Value",
    min: 0.0,
    max: 500.0,
    step: 0.1,
    default: 50.0,
};

pub const NO2_CONTROL: ControlSpec = ControlSpec {
    name: "no2_aqi_value",
    label: "NO2 AQI Value",
    min: 0.0,
    max: 500.0,
    step: 0.1,
    default: 50.0,
};

pub const PM25_CONTROL: ControlSpec = ControlSpec {
    name: "pm25_aqi_value",
    label: "PM2.5 AQI Value",
    min: 0.0,
    max: 500.0,
    step: 0.1,
    default: 50.0,
};

/// Slider controls in display order
pub const CONTROLS: [ControlSpec; 4] = [CO_CONTROL, OZONE_CONTROL, NO2_CONTROL, PM25_CONTROL];

/// One set of pollutant readings entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// Carbon monoxide AQI value
    #[serde(rename = "co_aqi_value")]
    pub co_aqi: f64,
    /// Ozone AQI value
    #[serde(rename = "ozone_aqi_value")]
    pub ozone_aqi: f64,
    /// Ozone AQI category
    #[serde(rename = "ozone_aqi_category")]
    pub ozone_category: AqiCategory,
    /// Nitrogen dioxide AQI value
    #[serde(rename = "no2_aqi_value")]
    pub no2_aqi: f64,
    /// Fine particulate matter AQI value
    #[serde(rename = "pm25_aqi_value")]
    pub pm25_aqi: f64,
}

impl Default for MeasurementInput {
    fn default() -> Self {
        Self {
            co_aqi: CO_CONTROL.default,
            ozone_aqi: OZONE_CONTROL.default,
            ozone_category: AqiCategory::default(),
            no2_aqi: NO2_CONTROL.default,
            pm25_aqi: PM25_CONTROL.default,
        }
    }
}

impl MeasurementInput {
    /// Check every reading against its slider bounds
    pub fn validate(&self) -> crate::Result<()> {
        CO_CONTROL.check(self.co_aqi)?;
        OZONE_CONTROL.check(self.ozone_aqi)?;
        NO2_CONTROL.check(self.no2_aqi)?;
        PM25_CONTROL.check(self.pm25_aqi)?;
        Ok(())
    }
}
