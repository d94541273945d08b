//! JSON API over the advisory engine

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::error;

use crate::advisory::PredictionReport;
use crate::engine::AdvisoryEngine;
use crate::models::{AqiCategory, CONTROLS, ControlSpec, MeasurementInput};
use crate::{AqiError, VERSION};

#[derive(Debug, Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiCategory {
    pub index: usize,
    pub label: &'static str,
}

impl From<AqiCategory> for ApiCategory {
    fn from(category: AqiCategory) -> Self {
        Self {
            index: category.index(),
            label: category.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiControls {
    pub sliders: Vec<ControlSpec>,
    pub categories: Vec<ApiCategory>,
    pub defaults: MeasurementInput,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Engine error mapped onto an HTTP response
#[derive(Debug)]
pub struct ApiError(AqiError);

impl From<AqiError> for ApiError {
    fn from(err: AqiError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AqiError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AqiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => {
                error!("Prediction request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ApiErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(engine: AdvisoryEngine) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/categories", get(get_categories))
        .route("/controls", get(get_controls))
        .route("/predict", post(predict))
        .with_state(engine)
}

async fn get_health() -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok",
        version: VERSION,
    })
}

async fn get_categories() -> Json<Vec<ApiCategory>> {
    Json(AqiCategory::ALL.into_iter().map(ApiCategory::from).collect())
}

async fn get_controls() -> Json<ApiControls> {
    Json(ApiControls {
        sliders: CONTROLS.to_vec(),
        categories: AqiCategory::ALL.into_iter().map(ApiCategory::from).collect(),
        defaults: MeasurementInput::default(),
    })
}

async fn predict(
    State(engine): State<AdvisoryEngine>,
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> Result<Json<PredictionReport>, ApiError> {
    let Json(input) = payload?;
    let report = engine.evaluate(&input)?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelRecord;
    use crate::regressor::AqiModel;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Predicts the PM2.5 reading verbatim
    struct Pm25Model;

    impl AqiModel for Pm25Model {
        fn predict(&self, record: &ModelRecord) -> crate::Result<f64> {
            Ok(record.pm25_aqi)
        }
    }

    fn app() -> Router {
        router(AdvisoryEngine::new(Arc::new(Pm25Model)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn predict_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_categories_are_indexed() {
        let response = app()
            .oneshot(Request::get("/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 6);
        assert_eq!(body[5], json!({"index": 5, "label": "Hazardous"}));
    }

    #[tokio::test]
    async fn test_controls_expose_slider_bounds() {
        let response = app()
            .oneshot(Request::get("/controls").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["sliders"][0]["label"], "CO AQI Value");
        assert_eq!(body["sliders"][0]["min"], 300.0);
        assert_eq!(body["defaults"]["ozone_aqi_category"], "Good");
    }

    #[tokio::test]
    async fn test_predict_returns_report() {
        let response = app()
            .oneshot(predict_request(json!({
                "co_aqi_value": 350.0,
                "ozone_aqi_value": 50.0,
                "ozone_aqi_category": "Good",
                "no2_aqi_value": 50.0,
                "pm25_aqi_value": 255.0
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["prediction"], 255.0);
        assert_eq!(body["label"], "Unhealthy");
        assert_eq!(body["color"], "#e74c3c");
        assert_eq!(body["progress_percentage"], 50.0);
        assert_eq!(
            body["message"],
            "Unhealthy Air Quality: Predicted AQI Value is 255.00"
        );
        assert!(body["suffocation_warning"].is_string());
    }

    #[tokio::test]
    async fn test_predict_out_of_range_is_unprocessable() {
        let response = app()
            .oneshot(predict_request(json!({
                "co_aqi_value": 10.0,
                "ozone_aqi_value": 50.0,
                "ozone_aqi_category": "Good",
                "no2_aqi_value": 50.0,
                "pm25_aqi_value": 50.0
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("CO AQI Value"));
    }

    #[tokio::test]
    async fn test_predict_unknown_category_is_rejected() {
        let response = app()
            .oneshot(predict_request(json!({
                "co_aqi_value": 350.0,
                "ozone_aqi_value": 50.0,
                "ozone_aqi_category": "Severe",
                "no2_aqi_value": 50.0,
                "pm25_aqi_value": 50.0
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Severe"));
    }

    #[tokio::test]
    async fn test_predict_missing_field_is_unprocessable() {
        let response = app()
            .oneshot(predict_request(json!({"co_aqi_value": 350.0})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("ozone_aqi_value"));
    }

    #[tokio::test]
    async fn test_predict_malformed_json_keeps_error_shape() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await["error"].is_string());
    }
}
