use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ApplicationId, CreditCardApplication};
use super::repository::{ApplicationRepository, RepositoryError, ReviewQueue};
use super::service::{ApplicationServiceError, CardApplicationService};
use super::validator::FrequentFlyerValidator;

/// Router builder exposing HTTP endpoints for intake and decisioning.
pub fn application_router<R, Q, V>(service: Arc<CardApplicationService<R, Q, V>>) -> Router
where
    R: ApplicationRepository + 'static,
    Q: ReviewQueue + 'static,
    V: FrequentFlyerValidator + 'static,
{
    Router::new()
        .route("/api/v1/cards/applications", post(submit_handler::<R, Q, V>))
        .route(
            "/api/v1/cards/applications/:application_id",
            get(status_handler::<R, Q, V>),
        )
        .route(
            "/api/v1/cards/applications/:application_id/decision",
            post(decision_handler::<R, Q, V>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, Q, V>(
    State(service): State<Arc<CardApplicationService<R, Q, V>>>,
    axum::Json(application): axum::Json<CreditCardApplication>,
) -> Response
where
    R: ApplicationRepository + 'static,
    Q: ReviewQueue + 'static,
    V: FrequentFlyerValidator + 'static,
{
    match service.submit(application) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn decision_handler<R, Q, V>(
    State(service): State<Arc<CardApplicationService<R, Q, V>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    Q: ReviewQueue + 'static,
    V: FrequentFlyerValidator + 'static,
{
    let id = ApplicationId(application_id);
    match service.decide(&id) {
        Ok(decision) => {
            let payload = json!({
                "application_id": id.0,
                "decision": decision.label(),
                "rationale": decision.summary(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "application not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, Q, V>(
    State(service): State<Arc<CardApplicationService<R, Q, V>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    Q: ReviewQueue + 'static,
    V: FrequentFlyerValidator + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "application not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
