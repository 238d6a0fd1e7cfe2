//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use solvy_shared::AppError;
use tracing::error;

use crate::AppState;

pub mod domains;
pub mod health;
pub mod reports;

/// Creates the router for everything under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(domains::routes())
        .nest("/ngo", reports::routes())
}

/// Renders an application error as `{error, message}`.
///
/// Details of server-side failures are logged and replaced by a generic message.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if err.is_internal() {
        error!(error = %err, "Request failed");
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message
        })),
    )
        .into_response()
}
