use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DocumentNumber, DocumentSubmission};
use super::repository::{CaseRepository, RepositoryError};
use super::risk::RiskScoreOverrides;
use super::service::{CaseServiceError, ComplianceCaseService, VoidActor};

/// Inbound document plus an optional evaluation instant; the wall clock is used when absent.
#[derive(Debug, Deserialize)]
pub struct SubmitCaseRequest {
    #[serde(flatten)]
    pub document: DocumentSubmission,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecheckRequest {
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub risk: RiskScoreOverrides,
}

#[derive(Debug, Deserialize)]
pub struct VoidRequest {
    pub actor: VoidActor,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Router builder exposing HTTP endpoints for case submission, lookup and rechecks.
pub fn case_router<R>(service: Arc<ComplianceCaseService<R>>) -> Router
where
    R: CaseRepository + 'static,
{
    Router::new()
        .route("/api/v1/compliance/cases", post(submit_handler::<R>))
        .route(
            "/api/v1/compliance/cases/:document_number",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/compliance/cases/:document_number/recheck",
            post(recheck_handler::<R>),
        )
        .route(
            "/api/v1/compliance/cases/:document_number/void",
            post(void_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ComplianceCaseService<R>>>,
    axum::Json(request): axum::Json<SubmitCaseRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    match service.submit(request.document, now) {
        Ok(case) => (StatusCode::ACCEPTED, axum::Json(case)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ComplianceCaseService<R>>>,
    Path(document_number): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let id = DocumentNumber(document_number);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.case)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recheck_handler<R>(
    State(service): State<Arc<ComplianceCaseService<R>>>,
    Path(document_number): Path<String>,
    axum::Json(request): axum::Json<RecheckRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let id = DocumentNumber(document_number);
    let now = request.now.unwrap_or_else(Utc::now);
    match service.recheck(&id, now, Some(&request.risk)) {
        Ok(retrospective) => (StatusCode::OK, axum::Json(retrospective)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn void_handler<R>(
    State(service): State<Arc<ComplianceCaseService<R>>>,
    Path(document_number): Path<String>,
    axum::Json(request): axum::Json<VoidRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let id = DocumentNumber(document_number);
    let now = request.now.unwrap_or_else(Utc::now);
    match service.void(&id, request.actor, now) {
        Ok(case) => (StatusCode::OK, axum::Json(case)).into_response(),
        Err(error) => error_response(error),
    }
}

/// HTTP status for a case service failure, shared with [`crate::error::AppError`].
pub(crate) fn case_error_status(error: &CaseServiceError) -> StatusCode {
    match error {
        CaseServiceError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CaseServiceError::Repository(RepositoryError::Conflict)
        | CaseServiceError::AlreadyVoid(_) => StatusCode::CONFLICT,
        CaseServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CaseServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: CaseServiceError) -> Response {
    let status = case_error_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
