use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{AssessmentId, RequestMetadata, Submission};
use super::repository::{AssessmentRepository, Notifier, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

pub const SESSION_HEADER: &str = "x-session-id";
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Router builder exposing the submit and status endpoints.
pub fn assessment_router<R, N>(service: Arc<AssessmentService<R, N>>) -> Router
where
    R: AssessmentRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/assessment", post(submit_handler::<R, N>))
        .route("/api/assessment/:assessment_id", get(status_handler::<R, N>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<AssessmentService<R, N>>>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> Response
where
    R: AssessmentRepository + 'static,
    N: Notifier + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let payload = json!({
                "error": "invalid_payload",
                "message": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let metadata = request_metadata(&headers, peer.map(|ConnectInfo(addr)| addr));

    match service.submit(submission, metadata).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(AssessmentServiceError::Validation(error)) => {
            let payload = json!({
                "error": "validation_error",
                "message": error.to_string(),
                "field": error.field().as_str(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Persistence(_) | AssessmentServiceError::Unexpected(_)) => {
            server_error("Failed to save assessment")
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<AssessmentService<R, N>>>,
    Path(assessment_id): Path<i64>,
) -> Response
where
    R: AssessmentRepository + 'static,
    N: Notifier + 'static,
{
    match service.get(AssessmentId(assessment_id)).await {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(AssessmentServiceError::Persistence(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "not_found",
                "message": format!("assessment {assessment_id} not found"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(_) => server_error("Failed to load assessment"),
    }
}

fn server_error(message: &str) -> Response {
    let payload = json!({
        "error": "server_error",
        "message": message,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

/// Collect session, user agent and originating address. A forwarded address wins over the peer.
pub(crate) fn request_metadata(headers: &HeaderMap, peer: Option<SocketAddr>) -> RequestMetadata {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let forwarded = header_text(FORWARDED_FOR_HEADER).and_then(|value| {
        value
            .split(',')
            .next()
            .map(str::trim)
            .filter(|first| !first.is_empty())
            .map(str::to_string)
    });

    RequestMetadata {
        session_id: header_text(SESSION_HEADER),
        user_agent: header_text(header::USER_AGENT.as_str()),
        ip_address: forwarded.or_else(|| peer.map(|addr| addr.ip().to_string())),
    }
}
