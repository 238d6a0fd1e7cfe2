//! Report generation service.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::{Account, AccountCategory, AccountType, LedgerEntry};

use super::types::{
    AggregateMetrics, Aggregation, EfficiencyRatios, NgoFinancialReport, OrganizationInfo,
    OrganizationProfile, ReportingPeriod, TransactionSummary, TransparencyInfo,
    VerificationStatus,
};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Aggregates ledger entries into transparency metrics and ratios.
    ///
    /// Entries whose account is missing from `accounts` contribute nothing and
    /// are listed in [`Aggregation::unmatched_entries`].
    #[must_use]
    pub fn aggregate(accounts: &[Account], entries: &[LedgerEntry]) -> Aggregation {
        let accounts_by_id: HashMap<_, _> = accounts.iter().map(|a| (a.id, a)).collect();

        let mut metrics = AggregateMetrics::default();
        let mut unmatched_entries = Vec::new();

        for entry in entries {
            let Some(account) = accounts_by_id.get(&entry.account_id) else {
                unmatched_entries.push(entry.id);
                continue;
            };
            Self::accumulate(&mut metrics, account, entry);
        }

        let ratios = Self::calculate_ratios(&metrics);

        Aggregation {
            metrics,
            ratios,
            unmatched_entries,
        }
    }

    /// Derives the efficiency ratios from accumulated metrics.
    ///
    /// Every ratio is rounded on its own and is 0 when its denominator is 0,
    /// so program efficiency and the administrative ratio may sum to 100 ± 0.01.
    #[must_use]
    pub fn calculate_ratios(metrics: &AggregateMetrics) -> EfficiencyRatios {
        let spending = metrics.program_expenses + metrics.administrative_costs;

        EfficiencyRatios {
            program_efficiency: percentage(metrics.program_expenses, spending),
            administrative_ratio: percentage(metrics.administrative_costs, spending),
            grant_allocation_ratio: percentage(
                metrics.grant_allocations,
                metrics.total_donations,
            ),
        }
    }

    /// Summarizes the transactions behind a set of entries.
    #[must_use]
    pub fn summarize_transactions(entries: &[LedgerEntry]) -> TransactionSummary {
        let transactions: HashSet<_> = entries.iter().map(|e| e.transaction_id).collect();

        TransactionSummary {
            total: transactions.len(),
            latest_transaction: entries.iter().map(|e| e.date).max(),
        }
    }

    /// Generates the NGO transparency report for one organization and period.
    ///
    /// `entries` are expected to be the period's entries; the period is only
    /// used for labelling.
    #[must_use]
    pub fn generate_ngo_report(
        organization: &OrganizationProfile,
        period: &ReportingPeriod,
        accounts: &[Account],
        entries: &[LedgerEntry],
        generated_at: DateTime<Utc>,
    ) -> NgoFinancialReport {
        let aggregation = Self::aggregate(accounts, entries);
        let transaction_summary = Self::summarize_transactions(entries);

        let transparency = TransparencyInfo {
            data_completeness: data_completeness(entries.len(), aggregation.unmatched_entries.len()),
            last_updated: transaction_summary
                .latest_transaction
                .unwrap_or_else(|| generated_at.date_naive()),
            verification_status: if aggregation.is_reconciled() {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Unreconciled
            },
        };

        NgoFinancialReport {
            organization_info: OrganizationInfo {
                name: organization.name.clone(),
                org_type: organization.org_type.clone(),
                reporting_period: period.label(),
                currency: organization.currency,
                generated_at,
            },
            metrics: aggregation.metrics,
            ratios: aggregation.ratios,
            transaction_summary,
            transparency,
            unmatched_entries: aggregation.unmatched_entries,
        }
    }

    fn accumulate(metrics: &mut AggregateMetrics, account: &Account, entry: &LedgerEntry) {
        match (account.account_type, account.category) {
            (AccountType::Revenue, AccountCategory::Donation) => {
                metrics.total_donations += entry.signed_amount();
            }
            (AccountType::Expense, AccountCategory::ProgramService) => {
                metrics.program_expenses += entry.amount.abs();
            }
            (AccountType::Expense, AccountCategory::GrantAllocation) => {
                metrics.grant_allocations += entry.amount.abs();
            }
            (AccountType::Expense, AccountCategory::Administrative) => {
                metrics.administrative_costs += entry.amount.abs();
            }
            _ => {}
        }
    }
}

/// `numerator / denominator * 100`, rounded half away from zero to 2 places.
fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    (numerator * ONE_HUNDRED / denominator)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn data_completeness(total: usize, unmatched: usize) -> String {
    if total == 0 {
        return "100.00%".to_string();
    }
    let matched = Decimal::from(total - unmatched);
    format!("{:.2}%", percentage(matched, Decimal::from(total)))
}
