use crate::infra::{step_descriptors, AppState, StepDescriptor};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use mindful_assessment::assessment::{
    AssessmentPipeline, DisplayResult, Metrics, Predictor, PredictorHealth,
};
use mindful_assessment::error::AppError;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Payload handed to the results view: the normalized result plus the
/// metrics used for the breakdown display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssessmentResponse {
    pub(crate) assessed_at: DateTime<Utc>,
    pub(crate) metrics: Metrics,
    pub(crate) result: DisplayResult,
}

pub(crate) fn with_assessment_routes<P>(pipeline: Arc<AssessmentPipeline<P>>) -> Router
where
    P: Predictor + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_endpoint::<P>))
        .route(
            "/api/v1/predictor/health",
            get(predictor_health_endpoint::<P>),
        )
        .with_state(pipeline)
        .route("/api/v1/assessments/steps", get(steps_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn steps_endpoint() -> Json<Vec<StepDescriptor>> {
    Json(step_descriptors())
}

/// Scores one submission. Always answers with a result; validation and
/// predictor failures surface only as the fallback note.
pub(crate) async fn assess_endpoint<P>(
    State(pipeline): State<Arc<AssessmentPipeline<P>>>,
    Json(metrics): Json<Metrics>,
) -> Json<AssessmentResponse>
where
    P: Predictor + 'static,
{
    let result = pipeline.assess(metrics).await;

    Json(AssessmentResponse {
        assessed_at: Utc::now(),
        metrics,
        result,
    })
}

pub(crate) async fn predictor_health_endpoint<P>(
    State(pipeline): State<Arc<AssessmentPipeline<P>>>,
) -> Result<Json<PredictorHealth>, AppError>
where
    P: Predictor + 'static,
{
    let health = pipeline.predictor().health().await?;
    Ok(Json(health))
}
