//! Health check endpoint.

use axum::{Extension, Json, Router, routing::get};
use serde::Serialize;

use crate::{AppState, middleware::ResolvedDomain};

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Domain the request resolved to.
    pub domain: String,
}

async fn health_check(Extension(domain): Extension<ResolvedDomain>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        domain: domain.0,
    })
}

/// Creates the health check route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
