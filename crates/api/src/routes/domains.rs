//! Domain directory endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use solvy_shared::DnsConfig;

use crate::AppState;

/// Served domains and the name servers that resolve them.
#[derive(Debug, Serialize)]
pub struct DomainsResponse {
    /// Root domain.
    pub root: String,
    /// Fully qualified subdomains.
    pub subdomains: Vec<String>,
    /// Published name servers.
    pub dns: DnsConfig,
}

/// GET /api/domains
async fn list_domains(State(state): State<AppState>) -> Json<DomainsResponse> {
    Json(DomainsResponse {
        root: state.domains.root().to_string(),
        subdomains: state.domains.subdomains().to_vec(),
        dns: state.domains.dns().clone(),
    })
}

/// Creates the domain directory route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/domains", get(list_domains))
}
