//! Server-rendered dashboard page
//!
//! The page is a single form: every slider or selector change resubmits it
//! as a GET query, and the response renders the prediction for those inputs.

use std::fmt::Write;

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use crate::AqiError;
use crate::advisory::PredictionReport;
use crate::engine::AdvisoryEngine;
use crate::models::measurement::{CO_CONTROL, NO2_CONTROL, OZONE_CONTROL, PM25_CONTROL};
use crate::models::{AqiCategory, CONTROLS, ControlSpec, MeasurementInput};

const STYLE: &str = r#"
body { font-family: 'Roboto', sans-serif; background-color: #f9f9f9; margin: 0 auto; max-width: 960px; padding: 20px; }
.main-title { text-align: center; font-size: 36px; color: red; margin-bottom: 10px; font-weight: bold; }
.sub-title { text-align: center; font-size: 18px; color: #555555; margin-bottom: 30px; }
.inputs { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; }
.control label { display: block; font-weight: bold; margin-bottom: 4px; }
.control input[type=range], .control select { width: 100%; }
.results { display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; }
.card { background-color: #ffffff; border-radius: 10px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); padding: 20px; margin: 10px 0; }
.card-header { font-size: 20px; font-weight: bold; margin-bottom: 10px; }
.alert { padding: 15px; font-size: 18px; text-align: center; border-radius: 5px; margin-top: 20px; color: #ffffff; font-weight: bold; }
.progress-bar { height: 20px; background-color: #e0e0e0; border-radius: 10px; overflow: hidden; margin: 15px 0; }
.progress-bar-fill { height: 100%; transition: width 0.3s ease; }
.suffocate-alert { color: #ffffff; background-color: #c0392b; font-weight: bold; padding: 10px; text-align: center; border-radius: 5px; margin-top: 20px; }
.input-error { color: #c0392b; background-color: #fdecea; padding: 10px; border-radius: 5px; margin-top: 20px; }
"#;

/// Query string of the dashboard form. Missing fields take slider defaults.
///
/// Readings arrive as raw text so that a malformed number is reported on the
/// page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub co_aqi_value: Option<String>,
    pub ozone_aqi_value: Option<String>,
    pub ozone_aqi_category: Option<String>,
    pub no2_aqi_value: Option<String>,
    pub pm25_aqi_value: Option<String>,
}

impl DashboardQuery {
    /// Readings for this query, falling back to defaults for absent fields
    pub fn to_input(&self) -> crate::Result<MeasurementInput> {
        let ozone_category = match &self.ozone_aqi_category {
            Some(label) => label.parse::<AqiCategory>()?,
            None => AqiCategory::default(),
        };
        Ok(MeasurementInput {
            co_aqi: reading(&self.co_aqi_value, &CO_CONTROL)?,
            ozone_aqi: reading(&self.ozone_aqi_value, &OZONE_CONTROL)?,
            ozone_category,
            no2_aqi: reading(&self.no2_aqi_value, &NO2_CONTROL)?,
            pm25_aqi: reading(&self.pm25_aqi_value, &PM25_CONTROL)?,
        })
    }

    /// Best-effort readings to put back into the form after a rejected query
    fn echoed(&self) -> MeasurementInput {
        let or_default = |raw: &Option<String>, control: &ControlSpec| {
            reading(raw, control).unwrap_or(control.default)
        };
        MeasurementInput {
            co_aqi: or_default(&self.co_aqi_value, &CO_CONTROL),
            ozone_aqi: or_default(&self.ozone_aqi_value, &OZONE_CONTROL),
            ozone_category: self
                .ozone_aqi_category
                .as_deref()
                .and_then(|label| label.parse().ok())
                .unwrap_or_default(),
            no2_aqi: or_default(&self.no2_aqi_value, &NO2_CONTROL),
            pm25_aqi: or_default(&self.pm25_aqi_value, &PM25_CONTROL),
        }
    }
}

fn reading(raw: &Option<String>, control: &ControlSpec) -> crate::Result<f64> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(control.default),
        Some(text) => text.parse::<f64>().map_err(|_| {
            AqiError::validation(format!("{} must be a number, got '{}'", control.label, text))
        }),
    }
}

pub fn router(engine: AdvisoryEngine) -> Router {
    Router::new()
        .route("/", get(show_dashboard))
        .with_state(engine)
}

async fn show_dashboard(
    State(engine): State<AdvisoryEngine>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let outcome = query
        .to_input()
        .and_then(|input| engine.evaluate(&input).map(|report| (input, report)));

    match outcome {
        Ok((input, report)) => Html(render_page(&input, Ok(&report))),
        Err(err) => {
            debug!("Dashboard input rejected: {}", err);
            // Echo the submitted readings back into the form
            Html(render_page(&query.echoed(), Err(&err.user_message())))
        }
    }
}

/// Render the complete dashboard page
pub fn render_page(input: &MeasurementInput, result: Result<&PredictionReport, &str>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>AQI Prediction Dashboard</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<div class=\"main-title\">AQI Prediction Dashboard</div>\n");
    html.push_str("<div class=\"sub-title\">Monitor real-time air quality predictions</div>\n");

    html.push_str("<h2>Input Parameters</h2>\n<form method=\"get\" action=\"/\">\n<div class=\"inputs\">\n");
    let [co, ozone, no2, pm25] = CONTROLS;
    render_slider(&mut html, &co, input.co_aqi);
    render_slider(&mut html, &ozone, input.ozone_aqi);
    render_category_select(&mut html, input.ozone_category);
    render_slider(&mut html, &no2, input.no2_aqi);
    render_slider(&mut html, &pm25, input.pm25_aqi);
    html.push_str("</div>\n<noscript><button type=\"submit\">Predict</button></noscript>\n</form>\n");

    match result {
        Ok(report) => render_report(&mut html, report),
        Err(message) => {
            let _ = writeln!(html, "<div class=\"input-error\">{}</div>", escape(message));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_slider(html: &mut String, control: &ControlSpec, value: f64) {
    let _ = writeln!(
        html,
        "<div class=\"control\"><label for=\"{name}\">{label}</label>\
         <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
         oninput=\"this.nextElementSibling.value = this.value\" onchange=\"this.form.submit()\">\
         <output>{value}</output></div>",
        name = control.name,
        label = escape(control.label),
        min = control.min,
        max = control.max,
        step = control.step,
        value = value,
    );
}

fn render_category_select(html: &mut String, selected: AqiCategory) {
    html.push_str(
        "<div class=\"control\"><label for=\"ozone_aqi_category\">Ozone AQI Category</label>\
         <select id=\"ozone_aqi_category\" name=\"ozone_aqi_category\" onchange=\"this.form.submit()\">",
    );
    for category in AqiCategory::ALL {
        let marker = if category == selected { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{label}\"{marker}>{label}</option>",
            label = escape(category.label()),
        );
    }
    html.push_str("</select></div>\n");
}

fn render_report(html: &mut String, report: &PredictionReport) {
    html.push_str("<div class=\"results\">\n");
    let _ = writeln!(
        html,
        "<div class=\"card\"><div class=\"card-header\">Prediction Result</div>\
         <div class=\"alert\" style=\"background-color: {color};\">{message}</div></div>",
        color = report.color,
        message = escape(&report.message),
    );
    let _ = writeln!(
        html,
        "<div class=\"card\"><div class=\"progress-bar\">\
         <div class=\"progress-bar-fill\" style=\"width: {percent}%; background-color: {color};\"></div>\
         </div></div>",
        percent = report.progress_percentage,
        color = report.color,
    );
    html.push_str("</div>\n");

    if let Some(warning) = report.suffocation_warning {
        let _ = writeln!(html, "<div class=\"suffocate-alert\">{}</div>", escape(warning));
    }
}

/// Escape text for HTML element content and quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
