//! Report repository for transparency report database operations.
//!
//! Loads the per-request ledger snapshot a report is computed from and
//! persists generated reports so they can be retrieved later.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use solvy_core::ledger::{Account, LedgerEntry};
use solvy_core::reports::{NgoFinancialReport, ReportingPeriod};
use solvy_shared::AppError;
use solvy_shared::types::{PageRequest, ReportId};
use uuid::Uuid;

use super::account::AccountRepository;
use super::transaction::TransactionRepository;
use crate::entities::financial_reports;

/// Error types for report storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportStoreError {
    /// Stored report body could not be encoded or decoded.
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportStoreError> for AppError {
    fn from(err: ReportStoreError) -> Self {
        match err {
            ReportStoreError::Serialization(e) => Self::Internal(e.to_string()),
            ReportStoreError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Accounts and entries read for one report request.
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    /// Active accounts of the organization.
    pub accounts: Vec<Account>,
    /// Entries of transactions dated within the period.
    pub entries: Vec<LedgerEntry>,
}

/// A persisted report with its identity.
#[derive(Debug, Clone)]
pub struct StoredReport {
    /// Report ID.
    pub id: ReportId,
    /// Organization the report belongs to.
    pub organization_id: Uuid,
    /// Period start.
    pub period_start: NaiveDate,
    /// Period end.
    pub period_end: NaiveDate,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Report body.
    pub report: NgoFinancialReport,
}

/// Listing entry for stored reports, without the body.
#[derive(Debug, Clone)]
pub struct StoredReportSummary {
    /// Report ID.
    pub id: ReportId,
    /// Period start.
    pub period_start: NaiveDate,
    /// Period end.
    pub period_end: NaiveDate,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Report repository for transparency report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the accounts and period entries of an organization.
    ///
    /// Accounts and entries are read in separate queries; writes landing in
    /// between may make the snapshot slightly inconsistent.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn load_snapshot(
        &self,
        organization_id: Uuid,
        period: &ReportingPeriod,
    ) -> Result<ReportSnapshot, DbErr> {
        let accounts = AccountRepository::new(self.db.clone())
            .list_active(organization_id)
            .await?;
        let entries = TransactionRepository::new(self.db.clone())
            .find_entries_in_period(organization_id, period)
            .await?;

        tracing::debug!(
            %organization_id,
            accounts = accounts.len(),
            entries = entries.len(),
            "Loaded report snapshot"
        );

        Ok(ReportSnapshot { accounts, entries })
    }

    /// Persists a generated report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized or inserted.
    pub async fn save_report(
        &self,
        organization_id: Uuid,
        period: &ReportingPeriod,
        report: &NgoFinancialReport,
    ) -> Result<ReportId, ReportStoreError> {
        let body = serde_json::to_value(report)?;
        let id = ReportId::new();

        financial_reports::ActiveModel {
            id: Set(id.into_inner()),
            organization_id: Set(organization_id),
            period_start: Set(period.start()),
            period_end: Set(period.end()),
            report: Set(body),
            generated_at: Set(report.organization_info.generated_at.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(id)
    }

    /// Finds a stored report of an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored body is unreadable.
    pub async fn find_report(
        &self,
        organization_id: Uuid,
        report_id: Uuid,
    ) -> Result<Option<StoredReport>, ReportStoreError> {
        let model = financial_reports::Entity::find_by_id(report_id)
            .filter(financial_reports::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?;

        model.map(to_stored_report).transpose()
    }

    /// Lists stored reports of an organization, newest first.
    ///
    /// Returns the requested page and the total number of reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_reports(
        &self,
        organization_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<StoredReportSummary>, u64), DbErr> {
        let paginator = financial_reports::Entity::find()
            .filter(financial_reports::Column::OrganizationId.eq(organization_id))
            .order_by_desc(financial_reports::Column::GeneratedAt)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_index()).await?;

        let summaries = models
            .into_iter()
            .map(|m| StoredReportSummary {
                id: ReportId::from_uuid(m.id),
                period_start: m.period_start,
                period_end: m.period_end,
                generated_at: m.generated_at.with_timezone(&Utc),
            })
            .collect();

        Ok((summaries, total))
    }
}

/// Decodes a stored report row.
pub fn to_stored_report(
    model: financial_reports::Model,
) -> Result<StoredReport, ReportStoreError> {
    let report: NgoFinancialReport = serde_json::from_value(model.report)?;
    Ok(StoredReport {
        id: ReportId::from_uuid(model.id),
        organization_id: model.organization_id,
        period_start: model.period_start,
        period_end: model.period_end,
        generated_at: model.generated_at.with_timezone(&Utc),
        report,
    })
}
