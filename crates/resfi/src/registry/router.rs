use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::repository::WaitlistRepository;
use super::service::{RegistrationError, WaitlistService, WELCOME_MESSAGE};
use crate::waitlist::WaitlistPayload;

/// Router builder exposing the waitlist endpoints the landing page uses.
pub fn waitlist_router<R>(service: Arc<WaitlistService<R>>) -> Router
where
    R: WaitlistRepository + 'static,
{
    Router::new()
        .route(
            "/api/waitlist",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/waitlist/count", get(count_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<WaitlistService<R>>>,
    axum::Json(payload): axum::Json<WaitlistPayload>,
) -> Response
where
    R: WaitlistRepository + 'static,
{
    match service.register(payload) {
        Ok(entry) => {
            let body = json!({
                "success": true,
                "message": WELCOME_MESSAGE,
                "data": entry,
            });
            (StatusCode::CREATED, axum::Json(body)).into_response()
        }
        Err(error @ RegistrationError::Duplicate) => {
            let body = json!({ "detail": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(body)).into_response()
        }
        Err(error @ RegistrationError::MissingField) => {
            let body = json!({ "detail": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
        }
        Err(RegistrationError::Repository(error)) => {
            tracing::error!(error = %error, "waitlist storage fault");
            let body = json!({ "detail": super::service::PROCESSING_ERROR_DETAIL });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<WaitlistService<R>>>) -> Response
where
    R: WaitlistRepository + 'static,
{
    match service.entries() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "failed to list waitlist entries");
            let body = json!({ "detail": "Failed to retrieve waitlist data" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

pub(crate) async fn count_handler<R>(State(service): State<Arc<WaitlistService<R>>>) -> Response
where
    R: WaitlistRepository + 'static,
{
    match service.count() {
        Ok(count) => (StatusCode::OK, axum::Json(json!({ "count": count }))).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "failed to count waitlist entries");
            let body = json!({ "detail": "Failed to retrieve waitlist data" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}
