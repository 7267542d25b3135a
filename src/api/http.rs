//! REST API over the inference service.
//!
//! - `GET  /health` - loaded models
//! - `GET  /domains` - the three pages in menu order
//! - `GET  /domains/:domain` - field table for one page
//! - `POST /domains/:domain/predict` - run one prediction

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::common::error::{ErrorCode, PredictionError, UnknownDomain};
use crate::features::catalog::DISCLAIMER;
use crate::features::domain::{DiseaseKind, DomainSpec, FeatureVector, Values};
use crate::features::service::with_defaults;
use crate::inference::dispatch::PageDispatcher;
use crate::inference::domain::PredictionOutcome;
use crate::inference::service::InferenceService;
use crate::models::domain::ModelSummary;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<InferenceService>,
}

impl AppState {
    pub fn new(service: InferenceService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub range_policy: &'static str,
    pub models: Vec<ModelSummary>,
}

#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub domain: DiseaseKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: usize,
}

#[derive(Debug, Serialize)]
pub struct DomainsResponse {
    pub default: DiseaseKind,
    pub pages: Vec<PageSummary>,
    pub disclaimer: &'static str,
}

/// Request body for the predict endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub values: Values,
    /// Fill absent fields with the form defaults.
    #[serde(default)]
    pub fill_defaults: bool,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub domain: DiseaseKind,
    pub outcome: PredictionOutcome,
    pub label: &'static str,
    pub raw: f64,
    pub features: FeatureVector,
    pub latency_us: u64,
    pub disclaimer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
}

/// Per-request failure rendered as JSON.
#[derive(Debug)]
pub enum ApiError {
    UnknownDomain(UnknownDomain),
    Prediction(PredictionError),
    Body(JsonRejection),
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Body(err)
    }
}

impl From<UnknownDomain> for ApiError {
    fn from(err: UnknownDomain) -> Self {
        ApiError::UnknownDomain(err)
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        ApiError::Prediction(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::UnknownDomain(err) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: err.to_string(),
                    code: err.code(),
                },
            ),
            ApiError::Prediction(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: err.to_string(),
                    code: err.code(),
                },
            ),
            ApiError::Body(err) => (
                err.status(),
                ErrorBody {
                    error: err.body_text(),
                    code: ErrorCode::MalformedBody,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the REST API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/domains", get(handle_domains))
        .route("/domains/:domain", get(handle_domain))
        .route("/domains/:domain/predict", post(handle_predict))
        .layer(cors)
        .with_state(state)
}

/// Serve until ctrl-c.
pub async fn run_server(addr: SocketAddr, service: InferenceService) -> anyhow::Result<()> {
    let router = create_router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "medpredict API listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("medpredict API stopped");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        range_policy: state.service.range_policy().as_str(),
        models: state.service.repository().describe(),
    })
}

pub async fn handle_domains() -> Json<DomainsResponse> {
    let pages = DiseaseKind::ALL
        .iter()
        .map(|kind| {
            let spec = kind.spec();
            PageSummary {
                domain: *kind,
                title: spec.title,
                subtitle: spec.subtitle,
                fields: spec.len(),
            }
        })
        .collect();

    Json(DomainsResponse {
        default: PageDispatcher::new().selected(),
        pages,
        disclaimer: DISCLAIMER,
    })
}

pub async fn handle_domain(
    Path(domain): Path<String>,
) -> Result<Json<&'static DomainSpec>, ApiError> {
    let kind: DiseaseKind = domain.parse()?;
    Ok(Json(kind.spec()))
}

pub async fn handle_predict(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut dispatcher = PageDispatcher::new();
    let kind = dispatcher.select_by_name(&domain)?;
    let Json(request) = payload?;

    let values = if request.fill_defaults {
        with_defaults(kind, &request.values)
    } else {
        request.values
    };

    let prediction = dispatcher.submit(&state.service, &values)?;
    Ok(Json(PredictResponse {
        domain: prediction.domain,
        outcome: prediction.outcome,
        label: prediction.label,
        raw: prediction.raw,
        features: prediction.features,
        latency_us: prediction.latency_us,
        disclaimer: DISCLAIMER,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::{FieldValue, RangePolicy};
    use crate::models::domain::LinearModel;
    use crate::models::registry::ModelRepository;

    fn state() -> AppState {
        // positive whenever Glucose (column 1) exceeds 150
        let mut diabetes = vec![0.0; 8];
        diabetes[1] = 1.0;
        let repo = ModelRepository::from_predictors(
            Arc::new(LinearModel::new(diabetes, -150.0)),
            Arc::new(LinearModel::new(vec![0.0; 13], -1.0)),
            Arc::new(LinearModel::new(vec![0.0; 22], -1.0)),
        );
        AppState::new(InferenceService::new(repo, RangePolicy::PassThrough))
    }

    fn request(pairs: &[(&str, f64)], fill_defaults: bool) -> PredictRequest {
        PredictRequest {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), FieldValue::Number(*v)))
                .collect(),
            fill_defaults,
        }
    }

    #[tokio::test]
    async fn predict_with_defaults_overlay() {
        let response = handle_predict(
            State(state()),
            Path("diabetes".to_string()),
            Ok(Json(request(&[("Glucose", 180.0)], true))),
        )
        .await
        .unwrap();
        assert_eq!(response.outcome, PredictionOutcome::Positive);
        assert_eq!(response.label, "The person is predicted to be Diabetic");
        assert_eq!(response.features.as_slice()[1], 180.0);
    }

    #[tokio::test]
    async fn predict_without_all_fields_is_unprocessable() {
        let err = handle_predict(
            State(state()),
            Path("diabetes".to_string()),
            Ok(Json(request(&[("Glucose", 180.0)], false))),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Prediction(_)));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    async fn error_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn predict_raw(body: &str) -> Result<Json<PredictResponse>, ApiError> {
        let request: PredictRequest = serde_json::from_str(body).unwrap();
        handle_predict(State(state()), Path("diabetes".to_string()), Ok(Json(request))).await
    }

    #[tokio::test]
    async fn boolean_value_is_a_conversion_error() {
        let err = predict_raw(r#"{"values": {"Age": true}, "fill_defaults": true}"#)
            .await
            .unwrap_err();
        let (status, body) = error_json(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "invalid_value");
        assert_eq!(
            body["error"],
            "invalid input: `true` is not valid for `Age`: expected an integer"
        );
    }

    #[tokio::test]
    async fn null_value_is_missing() {
        let err = predict_raw(
            r#"{"values": {"Pregnancies": 1, "Glucose": 120, "BloodPressure": 70,
                "SkinThickness": 20, "Insulin": 79, "BMI": 25.0,
                "DiabetesPedigreeFunction": 0.372, "Age": null}}"#,
        )
        .await
        .unwrap_err();
        let (status, body) = error_json(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "missing_field");
        assert_eq!(body["error"], "invalid input: missing value for `Age` (diabetes)");
    }

    #[tokio::test]
    async fn null_value_takes_the_default_when_filling() {
        let response = predict_raw(r#"{"values": {"Age": null}, "fill_defaults": true}"#)
            .await
            .unwrap();
        assert_eq!(response.features.as_slice()[7], 30.0);
    }

    #[tokio::test]
    async fn malformed_body_gets_json_error() {
        use axum::body::Body;
        use axum::extract::FromRequest;
        use axum::http::Request;

        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{\"values\": "))
            .unwrap();
        let rejection = Json::<PredictRequest>::from_request(req, &())
            .await
            .unwrap_err();

        let err = handle_predict(State(state()), Path("diabetes".to_string()), Err(rejection))
            .await
            .unwrap_err();
        let (status, body) = error_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "malformed_body");
    }

    #[tokio::test]
    async fn unknown_domain_is_not_found() {
        let err = handle_predict(
            State(state()),
            Path("kidney".to_string()),
            Ok(Json(PredictRequest::default())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn domain_accepts_menu_titles() {
        let spec = handle_domain(Path("Heart Disease Prediction".to_string()))
            .await
            .unwrap();
        assert_eq!(spec.kind, DiseaseKind::HeartDisease);
        assert_eq!(spec.fields.len(), 13);
    }

    #[tokio::test]
    async fn domains_list_menu_order_and_default() {
        let Json(body) = handle_domains().await;
        assert_eq!(body.default, DiseaseKind::Diabetes);
        let order: Vec<_> = body.pages.iter().map(|p| p.domain).collect();
        assert_eq!(order, DiseaseKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn health_reports_every_model() {
        let Json(body) = handle_health(State(state())).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.models.len(), 3);
        assert_eq!(body.range_policy, "pass-through");
    }
}
