//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Host/domain resolution middleware
//! - Response types

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use solvy_core::domain::DomainRegistry;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Known domains served by this instance.
    pub domains: Arc<DomainRegistry>,
    /// Organization reported on when a request names none.
    pub default_organization: Option<Uuid>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::domain::domain_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::HOST},
    };
    use http_body_util::BodyExt;
    use rstest::rstest;
    use solvy_shared::DomainConfig;
    use tower::ServiceExt;

    const DEFAULT_ORG: Uuid = Uuid::from_u128(1);

    fn test_state(enforce: bool) -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            domains: Arc::new(DomainRegistry::new(&DomainConfig {
                enforce,
                ..DomainConfig::default()
            })),
            default_organization: None,
        }
    }

    fn with_default_organization(state: AppState) -> AppState {
        AppState {
            default_organization: Some(DEFAULT_ORG),
            ..state
        }
    }

    async fn get(app: Router, uri: &str, host: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(HOST, host)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[rstest]
    #[case("/health")]
    #[case("/api/health")]
    #[tokio::test]
    async fn test_health_check(#[case] path: &str) {
        let (status, body) = get(create_router(test_state(false)), path, "localhost:8080").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["domain"], "solvy.chain");
    }

    #[rstest]
    #[case("solvy.chain", "solvy.chain")]
    #[case("unknown.solvy.chain", "solvy.chain")]
    #[case("education.solvy.chain:443", "education.solvy.chain")]
    #[tokio::test]
    async fn test_enforced_domain_accepts_solvy_hosts(#[case] host: &str, #[case] domain: &str) {
        let (status, body) = get(create_router(test_state(true)), "/health", host).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["domain"], domain);
    }

    #[rstest]
    #[case("example.com")]
    #[case("localhost:8080")]
    #[tokio::test]
    async fn test_enforced_domain_rejects_foreign_hosts(#[case] host: &str) {
        let (status, body) = get(create_router(test_state(true)), "/health", host).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Domain not found");
    }

    #[tokio::test]
    async fn test_inverted_period_rejected_before_database() {
        let uri = format!(
            "/api/ngo/financial-reports?organization_id={}&from=2026-03-31&to=2026-01-01",
            uuid::Uuid::now_v7()
        );
        let (status, body) = get(create_router(test_state(false)), &uri, "localhost").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("2026-03-31"));
    }

    #[rstest]
    #[case("/api/ngo/financial-reports")]
    #[case("/api/ngo/financial-reports/history")]
    #[case("/api/ngo/financial-reports/0192f1a0-0000-7000-8000-000000000000")]
    #[tokio::test]
    async fn test_bare_request_without_default_organization_not_found(#[case] uri: &str) {
        let (status, body) = get(create_router(test_state(false)), uri, "localhost").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("no default organization configured")
        );
    }

    #[tokio::test]
    async fn test_bare_request_resolves_default_organization() {
        // An inverted period fails after the organization is resolved and
        // before any query, so a 400 here means the bare request got past
        // organization resolution.
        let state = with_default_organization(test_state(false));
        let (status, body) = get(
            create_router(state),
            "/api/ngo/financial-reports?from=2026-03-31&to=2026-01-01",
            "localhost",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_domains_listing() {
        let (status, body) = get(create_router(test_state(false)), "/api/domains", "localhost").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["root"], "solvy.chain");
        assert_eq!(json["subdomains"][0], "education.solvy.chain");
        assert_eq!(json["dns"]["doh"], "https://dns1.noto.network");
        assert_eq!(json["dns"]["ipv4"][0], "34.154.40.173");
        assert_eq!(json["dns"]["ipv4"][1], "34.154.254.177");
    }
}
