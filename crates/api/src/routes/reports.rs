//! NGO transparency report routes.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, middleware::ResolvedDomain, routes::error_response};
use solvy_core::reports::{NgoFinancialReport, ReportError, ReportService, ReportingPeriod};
use solvy_db::{OrganizationRepository, ReportRepository, repositories::StoredReportSummary};
use solvy_shared::{
    AppError, AppResult,
    types::{PageRequest, PageResponse, ReportId},
};

/// Creates the NGO report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/financial-reports", get(generate_financial_report))
        .route("/financial-reports/history", get(list_financial_reports))
        .route("/financial-reports/{report_id}", get(get_financial_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for report generation.
#[derive(Debug, Deserialize)]
pub struct GenerateReportQuery {
    /// Organization to report on (defaults to the configured organization).
    pub organization_id: Option<Uuid>,
    /// Period start (defaults to January 1st of the end date's year).
    pub from: Option<NaiveDate>,
    /// Period end (defaults to today).
    pub to: Option<NaiveDate>,
}

/// Query parameters for report history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Organization whose reports are listed.
    pub organization_id: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl HistoryQuery {
    /// Pagination with defaults applied and bounds enforced.
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
        .normalized()
    }
}

/// Query parameters identifying the owning organization.
#[derive(Debug, Deserialize)]
pub struct OrganizationQuery {
    /// Organization the report belongs to.
    pub organization_id: Option<Uuid>,
}

// ============================================================================
// Response Types
// ============================================================================

/// A report together with its stored identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Report body.
    pub report: NgoFinancialReport,
    /// Stored report ID.
    pub report_id: ReportId,
}

/// Listing entry for report history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryResponse {
    /// Stored report ID.
    pub report_id: ReportId,
    /// Period start.
    pub period_start: NaiveDate,
    /// Period end.
    pub period_end: NaiveDate,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

impl From<StoredReportSummary> for ReportSummaryResponse {
    fn from(summary: StoredReportSummary) -> Self {
        Self {
            report_id: summary.id,
            period_start: summary.period_start,
            period_end: summary.period_end,
            generated_at: summary.generated_at,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the reporting period from optional bounds.
///
/// A missing end means today; a missing start means January 1st of the end's year.
fn resolve_period(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<ReportingPeriod, ReportError> {
    match (from, to) {
        (None, None) => Ok(ReportingPeriod::year_to_date(today)),
        (from, to) => {
            let end = to.unwrap_or(today);
            let start = from.unwrap_or_else(|| ReportingPeriod::year_to_date(end).start());
            ReportingPeriod::new(start, end)
        }
    }
}

/// Picks the requested organization, or the configured default when none is given.
fn resolve_organization(requested: Option<Uuid>, default: Option<Uuid>) -> AppResult<Uuid> {
    requested.or(default).ok_or_else(|| {
        AppError::NotFound(
            "No organization given and no default organization configured".to_string(),
        )
    })
}

fn organization_not_found(org_id: Uuid) -> AppError {
    AppError::NotFound(format!("Organization {org_id}"))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/ngo/financial-reports
///
/// Generates the transparency report for the period, stores it and returns it.
async fn generate_financial_report(
    State(state): State<AppState>,
    Extension(domain): Extension<ResolvedDomain>,
    Query(query): Query<GenerateReportQuery>,
) -> Response {
    let org_id = match resolve_organization(query.organization_id, state.default_organization) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let now = Utc::now();
    let period = match resolve_period(query.from, query.to, now.date_naive()) {
        Ok(period) => period,
        Err(e) => return error_response(&e.into()),
    };

    match generate_and_store(&state, org_id, &period, now).await {
        Ok(response) => {
            info!(
                domain = %domain.0,
                organization_id = %org_id,
                report_id = %response.report_id,
                period = %period.label(),
                "Generated NGO financial report"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

async fn generate_and_store(
    state: &AppState,
    org_id: Uuid,
    period: &ReportingPeriod,
    now: DateTime<Utc>,
) -> AppResult<ReportResponse> {
    let db = (*state.db).clone();

    let profile = OrganizationRepository::new(db.clone())
        .find_profile(org_id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| organization_not_found(org_id))?;

    let report_repo = ReportRepository::new(db);
    let snapshot = report_repo
        .load_snapshot(org_id, period)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let report = ReportService::generate_ngo_report(
        &profile,
        period,
        &snapshot.accounts,
        &snapshot.entries,
        now,
    );
    if !report.unmatched_entries.is_empty() {
        tracing::warn!(
            organization_id = %org_id,
            unmatched = report.unmatched_entries.len(),
            "Ledger entries reference accounts outside the active chart"
        );
    }

    let report_id = report_repo.save_report(org_id, period, &report).await?;

    Ok(ReportResponse { report, report_id })
}

/// GET /api/ngo/financial-reports/history
async fn list_financial_reports(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let org_id = match resolve_organization(query.organization_id, state.default_organization) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let page = query.page_request();
    let report_repo = ReportRepository::new((*state.db).clone());

    match report_repo.list_reports(org_id, &page).await {
        Ok((summaries, total)) => {
            let data = summaries
                .into_iter()
                .map(ReportSummaryResponse::from)
                .collect();
            let response = PageResponse::new(data, page.page, page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&AppError::Database(e.to_string())),
    }
}

/// GET /api/ngo/financial-reports/{report_id}
async fn get_financial_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    Query(query): Query<OrganizationQuery>,
) -> Response {
    let org_id = match resolve_organization(query.organization_id, state.default_organization) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let report_repo = ReportRepository::new((*state.db).clone());

    match report_repo.find_report(org_id, report_id).await {
        Ok(Some(stored)) => (
            StatusCode::OK,
            Json(ReportResponse {
                report: stored.report,
                report_id: stored.id,
            }),
        )
            .into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("Report {report_id}"))),
        Err(e) => error_response(&e.into()),
    }
}
