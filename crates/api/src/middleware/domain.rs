//! Host resolution middleware for the `solvy.chain` domain family.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::HOST},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;

/// Domain a request was resolved to, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDomain(pub String);

/// Resolves the request host and rejects hosts outside the served domains.
///
/// The `Host` header is used when present, otherwise the URI authority
/// (HTTP/2 requests carry the host there).
pub async fn domain_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().authority().map(axum::http::uri::Authority::as_str))
        .unwrap_or_default();

    let Some(domain) = state.domains.resolve(host) else {
        tracing::debug!(host, "Rejected request for unknown domain");
        return (StatusCode::NOT_FOUND, "Domain not found").into_response();
    };

    let domain = ResolvedDomain(domain.to_string());
    request.extensions_mut().insert(domain);
    next.run(request).await
}
