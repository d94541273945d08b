//! Integration tests for the AQI dashboard

use std::path::PathBuf;
use std::sync::Arc;

use aqi_dashboard::advisory::SUFFOCATION_WARNING;
use aqi_dashboard::config::ServerConfig;
use aqi_dashboard::{
    AdvisoryEngine, AqiCategory, AqiError, MeasurementInput, ModelArtifact, SeverityBand, web,
};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn engine(name: &str) -> AdvisoryEngine {
    let artifact = ModelArtifact::load(fixture(name)).expect("fixture model loads");
    AdvisoryEngine::new(Arc::new(artifact))
}

fn input(ozone: f64, category: AqiCategory, no2: f64, pm25: f64) -> MeasurementInput {
    MeasurementInput {
        co_aqi: 350.0,
        ozone_aqi: ozone,
        ozone_category: category,
        no2_aqi: no2,
        pm25_aqi: pm25,
    }
}

/// Default dashboard inputs through the linear fixture:
/// 2.5 + 0.25 * 50 + 10 * 0 + 0.25 * 50 + 50 = 77.5
#[test]
fn test_end_to_end_default_inputs() {
    let report = engine("linear_model.json")
        .evaluate(&input(50.0, AqiCategory::Good, 50.0, 50.0))
        .unwrap();

    assert_eq!(report.prediction, 77.5);
    assert_eq!(report.band, SeverityBand::Moderate);
    assert_eq!(report.color, "#f1c40f");
    assert_eq!(
        report.message,
        "Moderate Air Quality: Predicted AQI Value is 77.50"
    );
    assert!(report.suffocation_warning.is_none());
}

#[test]
fn test_category_index_reaches_the_model() {
    // 2.5 + 25 + 10 * 3 + 25 + 150 = 232.5
    let report = engine("linear_model.json")
        .evaluate(&input(100.0, AqiCategory::Unhealthy, 100.0, 150.0))
        .unwrap();
    assert_eq!(report.prediction, 232.5);
    assert_eq!(report.label, "Unhealthy");
    assert_eq!(report.suffocation_warning, Some(SUFFOCATION_WARNING));
}

#[rstest]
#[case(input(50.0, AqiCategory::Good, 50.0, 50.0), 50.0, SeverityBand::Good, false)]
#[case(input(50.0, AqiCategory::Hazardous, 50.0, 80.0), 90.0, SeverityBand::Moderate, false)]
#[case(input(100.0, AqiCategory::Good, 50.0, 120.0), 220.0, SeverityBand::Unhealthy, true)]
#[case(input(200.0, AqiCategory::Good, 50.0, 200.0), 290.0, SeverityBand::Unhealthy, true)]
fn test_forest_fixture(
    #[case] readings: MeasurementInput,
    #[case] expected: f64,
    #[case] band: SeverityBand,
    #[case] warns: bool,
) {
    let report = engine("forest_model.json").evaluate(&readings).unwrap();
    assert_eq!(report.prediction, expected);
    assert_eq!(report.band, band);
    assert_eq!(report.suffocation_warning.is_some(), warns);
}

#[test]
fn test_reordered_model_fails_at_load() {
    let err = ModelArtifact::load(fixture("reordered_model.json")).unwrap_err();
    assert!(matches!(err, AqiError::SchemaMismatch { .. }));
}

#[test]
fn test_missing_model_fails_at_load() {
    let err = ModelArtifact::load(fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, AqiError::ModelLoad { .. }));
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
    let app = web::app(engine("linear_model.json"), &ServerConfig::default());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_dashboard_page_renders_prediction() {
    let (status, html) = send(Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Moderate Air Quality: Predicted AQI Value is 77.50"));
    assert!(html.contains("background-color: #f1c40f;"));
    assert!(!html.contains(SUFFOCATION_WARNING));
}

#[tokio::test]
async fn test_dashboard_query_changes_prediction() {
    let uri = "/?ozone_aqi_value=100&ozone_aqi_category=Unhealthy&no2_aqi_value=100&pm25_aqi_value=150";
    let (status, html) = send(Request::get(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Unhealthy Air Quality: Predicted AQI Value is 232.50"));
    assert!(html.contains("<option value=\"Unhealthy\" selected>Unhealthy</option>"));
    assert!(html.contains(SUFFOCATION_WARNING));
}

#[tokio::test]
async fn test_dashboard_shows_validation_error() {
    let (status, html) = send(
        Request::get("/?co_aqi_value=5000")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("class=\"input-error\""));
    assert!(html.contains("CO AQI Value must be between 300 and 1000"));
}

#[tokio::test]
async fn test_dashboard_reports_non_numeric_reading() {
    let (status, html) = send(
        Request::get("/?co_aqi_value=abc&pm25_aqi_value=120")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("class=\"input-error\""));
    assert!(html.contains("CO AQI Value must be a number, got &#39;abc&#39;"));
    // The valid reading is echoed back into its slider
    assert!(html.contains("name=\"pm25_aqi_value\" min=\"0\" max=\"500\" step=\"0.1\" value=\"120\""));
    assert!(!html.contains("Prediction Result"));
}

#[tokio::test]
async fn test_api_unknown_category_uses_json_error() {
    let body = json!({
        "co_aqi_value": 350.0,
        "ozone_aqi_value": 50.0,
        "ozone_aqi_category": "Severe",
        "no2_aqi_value": 50.0,
        "pm25_aqi_value": 50.0
    });
    let request = Request::post("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, text) = send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = serde_json::from_str(&text).unwrap();
    assert!(error["error"].as_str().unwrap().contains("Unknown AQI category"));
}

#[tokio::test]
async fn test_api_predict_through_full_app() {
    let body = json!({
        "co_aqi_value": 350.0,
        "ozone_aqi_value": 50.0,
        "ozone_aqi_category": "Good",
        "no2_aqi_value": 50.0,
        "pm25_aqi_value": 50.0
    });
    let request = Request::post("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, text) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["prediction"], 77.5);
    assert_eq!(report["band"], "Moderate");
    assert_eq!(report["suffocation_warning"], Value::Null);
}

#[tokio::test]
async fn test_api_rejects_oversized_body() {
    let body = format!("{{\"padding\": \"{}\"}}", "x".repeat(64 * 1024));
    let request = Request::post("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
