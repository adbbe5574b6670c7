use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ApplicantProfile;
use super::intake::Assessment;
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{AdvisingSessionService, SessionServiceError};
use crate::error::AppError;

/// One applicant answer posted to a running session.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

/// Router builder exposing conversational intake and one-shot assessment.
pub fn advising_router<R>(service: Arc<AdvisingSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(start_handler::<R>))
        .route("/api/v1/sessions/:session_id", get(status_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/replies",
            post(reply_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/cancel",
            post(cancel_handler::<R>),
        )
        .route("/api/v1/assessments", post(assessment_handler::<R>))
        .route("/api/v1/help", get(help_handler::<R>))
        .with_state(service)
}

fn error_response(session_id: Option<&SessionId>, error: SessionServiceError) -> Response {
    let status = match &error {
        SessionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Repository(RepositoryError::Conflict)
        | SessionServiceError::Repository(RepositoryError::Stale { .. })
        | SessionServiceError::Finished(_) => StatusCode::CONFLICT,
        SessionServiceError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = match session_id {
        Some(id) => json!({ "session_id": id.0, "error": error.to_string() }),
        None => json!({ "error": error.to_string() }),
    };
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<AdvisingSessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start() {
        Ok(reply) => (StatusCode::CREATED, axum::Json(reply)).into_response(),
        Err(error) => error_response(None, error),
    }
}

pub(crate) async fn reply_handler<R>(
    State(service): State<Arc<AdvisingSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<ReplyRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.reply(&id, &request.text) {
        Ok(reply) => (StatusCode::OK, axum::Json(reply)).into_response(),
        Err(error) => error_response(Some(&id), error),
    }
}

pub(crate) async fn cancel_handler<R>(
    State(service): State<Arc<AdvisingSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.cancel(&id) {
        Ok(reply) => (StatusCode::OK, axum::Json(reply)).into_response(),
        Err(error) => error_response(Some(&id), error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AdvisingSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(Some(&id), error),
    }
}

pub(crate) async fn assessment_handler<R>(
    State(service): State<Arc<AdvisingSessionService<R>>>,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Result<axum::Json<Assessment>, AppError>
where
    R: SessionRepository + 'static,
{
    let assessment = service.assess(&profile)?;
    Ok(axum::Json(assessment))
}

pub(crate) async fn help_handler<R>(
    State(service): State<Arc<AdvisingSessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    axum::Json(json!({ "help": service.help() })).into_response()
}
