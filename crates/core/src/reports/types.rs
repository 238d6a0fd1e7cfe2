//! Report data types.
//!
//! Report bodies serialize in camelCase, the shape the transparency dashboard
//! consumes.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solvy_shared::types::{Currency, LedgerEntryId, OrganizationId};

use super::error::ReportError;

/// Running totals accumulated over one report's ledger entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    /// Grants and donations received (credit-signed).
    pub total_donations: Decimal,
    /// Program service spending.
    pub program_expenses: Decimal,
    /// Administrative overhead.
    pub administrative_costs: Decimal,
    /// Grants disbursed to external recipients.
    pub grant_allocations: Decimal,
}

/// Efficiency ratios, in percent, rounded to two decimal places.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyRatios {
    /// Program expenses over program plus administrative spending.
    pub program_efficiency: Decimal,
    /// Administrative costs over program plus administrative spending.
    pub administrative_ratio: Decimal,
    /// Grant allocations over total donations.
    pub grant_allocation_ratio: Decimal,
}

/// Result of aggregating one snapshot of accounts and entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Accumulated totals.
    pub metrics: AggregateMetrics,
    /// Ratios derived from `metrics`.
    pub ratios: EfficiencyRatios,
    /// Entries whose account was not part of the snapshot, in input order.
    pub unmatched_entries: Vec<LedgerEntryId>,
}

impl Aggregation {
    /// Returns true if every entry was matched to an account.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.unmatched_entries.is_empty()
    }
}

/// Pass-through summary of the entries a report was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Number of distinct transactions.
    pub total: usize,
    /// Date of the latest transaction, if any.
    pub latest_transaction: Option<NaiveDate>,
}

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportingPeriod {
    /// Creates a period, rejecting ranges that end before they start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// January 1st of `today`'s year through `today`.
    #[must_use]
    pub fn year_to_date(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { start, end: today }
    }

    /// First day of the period.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Human-readable label, e.g. `2026-01-01 to 2026-03-31`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

/// The organizational unit a report is generated for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationProfile {
    /// Organization ID.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Organization type (e.g. "NGO").
    pub org_type: String,
    /// Reporting currency.
    pub currency: Currency,
}

/// Header section of a transparency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInfo {
    /// Organization name.
    pub name: String,
    /// Organization type.
    #[serde(rename = "type")]
    pub org_type: String,
    /// Reporting period label.
    pub reporting_period: String,
    /// Currency all amounts are expressed in.
    pub currency: Currency,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Whether all ledger entries reconciled against the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Every entry matched an account.
    Verified,
    /// At least one entry referenced an unknown account.
    Unreconciled,
}

/// Data-quality section of a transparency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyInfo {
    /// Share of entries matched to an account, e.g. `"98.50%"`.
    pub data_completeness: String,
    /// Latest ledger date, or the generation date for an empty ledger.
    pub last_updated: NaiveDate,
    /// Reconciliation outcome.
    pub verification_status: VerificationStatus,
}

/// NGO financial transparency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NgoFinancialReport {
    /// Organization header.
    pub organization_info: OrganizationInfo,
    /// Accumulated totals.
    pub metrics: AggregateMetrics,
    /// Derived ratios.
    pub ratios: EfficiencyRatios,
    /// Summary of the underlying transactions.
    pub transaction_summary: TransactionSummary,
    /// Data-quality section.
    pub transparency: TransparencyInfo,
    /// Entries that referenced an unknown account.
    #[serde(default)]
    pub unmatched_entries: Vec<LedgerEntryId>,
}
