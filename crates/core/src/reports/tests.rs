//! Scenario and property-based tests for the reports module.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solvy_shared::types::{AccountId, Currency, LedgerEntryId, OrganizationId, TransactionId};

use super::service::ReportService;
use super::types::{
    AggregateMetrics, OrganizationProfile, ReportingPeriod, VerificationStatus,
};
use super::ReportError;
use crate::ledger::{Account, AccountCategory, AccountType, EntryType, LedgerEntry};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn account(name: &str, account_type: AccountType) -> Account {
    Account::new("0000", name, account_type, None)
}

fn entry(account: AccountId, entry_type: EntryType, amount: Decimal) -> LedgerEntry {
    entry_on(account, entry_type, amount, date(2026, 3, 15))
}

fn entry_on(
    account: AccountId,
    entry_type: EntryType,
    amount: Decimal,
    on: NaiveDate,
) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::new(),
        transaction_id: TransactionId::new(),
        account_id: account,
        entry_type,
        amount,
        date: on,
    }
}

fn profile() -> OrganizationProfile {
    OrganizationProfile {
        id: OrganizationId::new(),
        name: "SOLVY Foundation".to_string(),
        org_type: "NGO".to_string(),
        currency: Currency::Usd,
    }
}

// ============================================================================
// Aggregation scenarios
// ============================================================================

#[test]
fn test_empty_entries_yield_zeroes() {
    let accounts = vec![account("Grant Income", AccountType::Revenue)];
    let result = ReportService::aggregate(&accounts, &[]);

    assert_eq!(result.metrics, AggregateMetrics::default());
    assert_eq!(result.ratios.program_efficiency, Decimal::ZERO);
    assert_eq!(result.ratios.administrative_ratio, Decimal::ZERO);
    assert_eq!(result.ratios.grant_allocation_ratio, Decimal::ZERO);
    assert!(result.is_reconciled());
}

#[test]
fn test_grant_income_credit_counts_as_donation() {
    let grant_income = account("Grant Income", AccountType::Revenue);
    let entries = vec![entry(grant_income.id, EntryType::Credit, dec!(1000))];

    let result = ReportService::aggregate(&[grant_income], &entries);

    assert_eq!(result.metrics.total_donations, dec!(1000));
}

#[test]
fn test_donation_debit_reduces_total() {
    let donations = account("Individual Donations", AccountType::Revenue);
    let entries = vec![
        entry(donations.id, EntryType::Credit, dec!(500)),
        entry(donations.id, EntryType::Debit, dec!(120)),
    ];

    let result = ReportService::aggregate(&[donations], &entries);

    assert_eq!(result.metrics.total_donations, dec!(380));
}

#[test]
fn test_program_and_administrative_split() {
    let program = account("Program Services", AccountType::Expense);
    let admin = account("Administrative Overhead", AccountType::Expense);
    let entries = vec![
        entry(program.id, EntryType::Debit, dec!(400)),
        entry(admin.id, EntryType::Debit, dec!(100)),
    ];

    let result = ReportService::aggregate(&[program, admin], &entries);

    assert_eq!(result.metrics.program_expenses, dec!(400));
    assert_eq!(result.metrics.administrative_costs, dec!(100));
    assert_eq!(result.ratios.program_efficiency, dec!(80.00));
    assert_eq!(result.ratios.administrative_ratio, dec!(20.00));
}

#[test]
fn test_expenses_accumulate_absolute_amounts() {
    let program = account("Program Services", AccountType::Expense);
    let entries = vec![
        entry(program.id, EntryType::Debit, dec!(300)),
        entry(program.id, EntryType::Credit, dec!(50)),
    ];

    let result = ReportService::aggregate(&[program], &entries);

    assert_eq!(result.metrics.program_expenses, dec!(350));
}

#[test]
fn test_unknown_account_is_reported_not_counted() {
    let program = account("Program Services", AccountType::Expense);
    let orphan = entry(AccountId::new(), EntryType::Debit, dec!(999));
    let orphan_id = orphan.id;

    let result = ReportService::aggregate(&[program], &[orphan]);

    assert_eq!(result.metrics, AggregateMetrics::default());
    assert_eq!(result.unmatched_entries, vec![orphan_id]);
    assert!(!result.is_reconciled());
}

#[test]
fn test_grant_ratio_zero_without_donations() {
    let grants = account("Grant Disbursements", AccountType::Expense);
    let entries = vec![entry(grants.id, EntryType::Debit, dec!(50))];

    let result = ReportService::aggregate(&[grants], &entries);

    assert_eq!(result.metrics.grant_allocations, dec!(50));
    assert_eq!(result.metrics.total_donations, Decimal::ZERO);
    assert_eq!(result.ratios.grant_allocation_ratio, Decimal::ZERO);
}

#[test]
fn test_grant_allocation_ratio() {
    let income = account("Grant Income", AccountType::Revenue);
    let grants = account("Grant Disbursements", AccountType::Expense);
    let entries = vec![
        entry(income.id, EntryType::Credit, dec!(3000)),
        entry(grants.id, EntryType::Debit, dec!(1000)),
    ];

    let result = ReportService::aggregate(&[income, grants], &entries);

    assert_eq!(result.ratios.grant_allocation_ratio, dec!(33.33));
}

#[rstest]
#[case("Cash", AccountType::Asset)]
#[case("Accounts Payable", AccountType::Liability)]
#[case("Net Assets", AccountType::Equity)]
#[case("Program Fees", AccountType::Revenue)]
#[case("Office Rent", AccountType::Expense)]
#[case("Grant Receivable", AccountType::Asset)]
fn test_unclassified_accounts_are_ignored(#[case] name: &str, #[case] account_type: AccountType) {
    let acct = account(name, account_type);
    let entries = vec![
        entry(acct.id, EntryType::Debit, dec!(75)),
        entry(acct.id, EntryType::Credit, dec!(25)),
    ];

    let result = ReportService::aggregate(&[acct], &entries);

    assert_eq!(result.metrics, AggregateMetrics::default());
    assert!(result.is_reconciled());
}

#[test]
fn test_category_drives_classification_not_name() {
    let renamed = Account::new(
        "5100",
        "Direct Services",
        AccountType::Expense,
        Some(AccountCategory::ProgramService),
    );
    let entries = vec![entry(renamed.id, EntryType::Debit, dec!(200))];

    let result = ReportService::aggregate(&[renamed], &entries);

    assert_eq!(result.metrics.program_expenses, dec!(200));
}

#[test]
fn test_category_on_wrong_type_is_ignored() {
    let odd = Account::new(
        "4200",
        "Misfiled",
        AccountType::Revenue,
        Some(AccountCategory::ProgramService),
    );
    let entries = vec![entry(odd.id, EntryType::Credit, dec!(10))];

    let result = ReportService::aggregate(&[odd], &entries);

    assert_eq!(result.metrics, AggregateMetrics::default());
}

#[test]
fn test_ratios_round_to_two_places() {
    let program = account("Program Services", AccountType::Expense);
    let admin = account("Administrative Overhead", AccountType::Expense);
    let entries = vec![
        entry(program.id, EntryType::Debit, dec!(2)),
        entry(admin.id, EntryType::Debit, dec!(1)),
    ];

    let result = ReportService::aggregate(&[program, admin], &entries);

    assert_eq!(result.ratios.program_efficiency, dec!(66.67));
    assert_eq!(result.ratios.administrative_ratio, dec!(33.33));
}

#[rstest]
#[case(dec!(1), dec!(799), dec!(0.13), dec!(99.88))]
#[case(dec!(799), dec!(1), dec!(99.88), dec!(0.13))]
#[case(dec!(1), dec!(7), dec!(12.50), dec!(87.50))]
fn test_spending_ratios_round_independently(
    #[case] program: Decimal,
    #[case] admin: Decimal,
    #[case] expected_program: Decimal,
    #[case] expected_admin: Decimal,
) {
    let metrics = AggregateMetrics {
        program_expenses: program,
        administrative_costs: admin,
        ..AggregateMetrics::default()
    };

    let ratios = ReportService::calculate_ratios(&metrics);

    assert_eq!(ratios.program_efficiency, expected_program);
    assert_eq!(ratios.administrative_ratio, expected_admin);
}

// ============================================================================
// Transaction summary and report assembly
// ============================================================================

#[test]
fn test_summary_counts_distinct_transactions() {
    let income = account("Grant Income", AccountType::Revenue);
    let cash = account("Cash", AccountType::Asset);
    let tx = TransactionId::new();
    let mut credit = entry_on(income.id, EntryType::Credit, dec!(100), date(2026, 2, 1));
    let mut debit = entry_on(cash.id, EntryType::Debit, dec!(100), date(2026, 2, 1));
    credit.transaction_id = tx;
    debit.transaction_id = tx;
    let later = entry_on(income.id, EntryType::Credit, dec!(5), date(2026, 4, 2));

    let summary = ReportService::summarize_transactions(&[credit, debit, later]);

    assert_eq!(summary.total, 2);
    assert_eq!(summary.latest_transaction, Some(date(2026, 4, 2)));
}

#[test]
fn test_summary_of_nothing() {
    let summary = ReportService::summarize_transactions(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.latest_transaction, None);
}

#[test]
fn test_generate_ngo_report_verified() {
    let income = account("Grant Income", AccountType::Revenue);
    let program = account("Program Services", AccountType::Expense);
    let admin = account("Administrative Overhead", AccountType::Expense);
    let entries = vec![
        entry_on(income.id, EntryType::Credit, dec!(1000), date(2026, 1, 10)),
        entry_on(program.id, EntryType::Debit, dec!(400), date(2026, 2, 10)),
        entry_on(admin.id, EntryType::Debit, dec!(100), date(2026, 3, 10)),
    ];
    let period = ReportingPeriod::new(date(2026, 1, 1), date(2026, 3, 31)).unwrap();
    let generated_at = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();

    let report = ReportService::generate_ngo_report(
        &profile(),
        &period,
        &[income, program, admin],
        &entries,
        generated_at,
    );

    assert_eq!(report.organization_info.name, "SOLVY Foundation");
    assert_eq!(report.organization_info.org_type, "NGO");
    assert_eq!(
        report.organization_info.reporting_period,
        "2026-01-01 to 2026-03-31"
    );
    assert_eq!(report.organization_info.generated_at, generated_at);
    assert_eq!(report.metrics.total_donations, dec!(1000));
    assert_eq!(report.ratios.program_efficiency, dec!(80.00));
    assert_eq!(report.transaction_summary.total, 3);
    assert_eq!(report.transparency.data_completeness, "100.00%");
    assert_eq!(report.transparency.last_updated, date(2026, 3, 10));
    assert_eq!(
        report.transparency.verification_status,
        VerificationStatus::Verified
    );
    assert!(report.unmatched_entries.is_empty());
}

#[test]
fn test_generate_ngo_report_unreconciled() {
    let income = account("Grant Income", AccountType::Revenue);
    let mut entries: Vec<_> = (0..3)
        .map(|_| entry(income.id, EntryType::Credit, dec!(10)))
        .collect();
    entries.push(entry(AccountId::new(), EntryType::Credit, dec!(10)));
    let period = ReportingPeriod::year_to_date(date(2026, 6, 30));

    let report =
        ReportService::generate_ngo_report(&profile(), &period, &[income], &entries, Utc::now());

    assert_eq!(report.metrics.total_donations, dec!(30));
    assert_eq!(report.transparency.data_completeness, "75.00%");
    assert_eq!(
        report.transparency.verification_status,
        VerificationStatus::Unreconciled
    );
    assert_eq!(report.unmatched_entries.len(), 1);
}

#[test]
fn test_empty_report_uses_generation_date() {
    let generated_at = Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap();
    let period = ReportingPeriod::year_to_date(generated_at.date_naive());

    let report = ReportService::generate_ngo_report(&profile(), &period, &[], &[], generated_at);

    assert_eq!(report.transparency.last_updated, date(2026, 5, 20));
    assert_eq!(report.transparency.data_completeness, "100.00%");
    assert_eq!(report.transaction_summary.latest_transaction, None);
}

#[test]
fn test_report_serializes_in_dashboard_shape() {
    let period = ReportingPeriod::new(date(2026, 1, 1), date(2026, 12, 31)).unwrap();
    let report = ReportService::generate_ngo_report(&profile(), &period, &[], &[], Utc::now());

    let json = serde_json::to_value(&report).unwrap();

    assert!(json["organizationInfo"]["type"].is_string());
    assert!(json["organizationInfo"]["reportingPeriod"].is_string());
    assert!(json["metrics"]["totalDonations"].is_string());
    assert!(json["ratios"]["grantAllocationRatio"].is_string());
    assert!(json["transactionSummary"]["latestTransaction"].is_null());
    assert_eq!(json["transparency"]["verificationStatus"], "verified");
    assert!(json["unmatchedEntries"].is_array());
}

// ============================================================================
// Reporting period
// ============================================================================

#[test]
fn test_period_rejects_inverted_range() {
    let err = ReportingPeriod::new(date(2026, 3, 1), date(2026, 2, 1)).unwrap_err();
    assert!(matches!(err, ReportError::InvalidDateRange { .. }));
}

#[test]
fn test_single_day_period() {
    let period = ReportingPeriod::new(date(2026, 3, 1), date(2026, 3, 1)).unwrap();
    assert!(period.contains(date(2026, 3, 1)));
    assert!(!period.contains(date(2026, 3, 2)));
}

#[test]
fn test_year_to_date() {
    let period = ReportingPeriod::year_to_date(date(2026, 10, 19));
    assert_eq!(period.start(), date(2026, 1, 1));
    assert_eq!(period.end(), date(2026, 10, 19));
}

// ============================================================================
// Properties
// ============================================================================

/// Strategy for generating positive decimal amounts with cents.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

/// A fixed NGO chart of accounts used by the property tests.
fn chart_of_accounts() -> Vec<Account> {
    vec![
        account("Grant Income", AccountType::Revenue),
        account("Individual Donations", AccountType::Revenue),
        account("Program Services", AccountType::Expense),
        account("Grant Disbursements", AccountType::Expense),
        account("Administrative Overhead", AccountType::Expense),
        account("Cash", AccountType::Asset),
    ]
}

/// A chart of accounts plus entries against it; some entries reference an
/// account that is not in the chart.
fn snapshot_strategy() -> impl Strategy<Value = (Vec<Account>, Vec<LedgerEntry>)> {
    prop::collection::vec((0..=6usize, entry_type_strategy(), amount_strategy()), 0..40).prop_map(
        |rows| {
            let accounts = chart_of_accounts();
            let entries = rows
                .into_iter()
                .map(|(idx, entry_type, amount)| {
                    // idx == accounts.len() picks an account outside the chart
                    let account_id = accounts.get(idx).map_or_else(AccountId::new, |a| a.id);
                    entry(account_id, entry_type, amount)
                })
                .collect();
            (accounts, entries)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Program efficiency and administrative ratio sum to 100, within the
    /// rounding of each to 2 places, when there is any program or
    /// administrative spending, and are both 0 otherwise.
    #[test]
    fn prop_spending_ratios_sum_to_hundred((accounts, entries) in snapshot_strategy()) {
        let result = ReportService::aggregate(&accounts, &entries);
        let spending = result.metrics.program_expenses + result.metrics.administrative_costs;

        if spending > Decimal::ZERO {
            let sum = result.ratios.program_efficiency + result.ratios.administrative_ratio;
            prop_assert!((sum - dec!(100)).abs() <= dec!(0.01), "sum was {}", sum);
        } else {
            prop_assert_eq!(result.ratios.program_efficiency, Decimal::ZERO);
            prop_assert_eq!(result.ratios.administrative_ratio, Decimal::ZERO);
        }
    }

    /// Aggregating the same snapshot twice gives identical results.
    #[test]
    fn prop_aggregate_is_deterministic((accounts, entries) in snapshot_strategy()) {
        let first = ReportService::aggregate(&accounts, &entries);
        let second = ReportService::aggregate(&accounts, &entries);
        prop_assert_eq!(first, second);
    }

    /// Every entry is either counted against a known account or reported as
    /// unmatched, never both.
    #[test]
    fn prop_unmatched_entries_are_exactly_the_orphans((accounts, entries) in snapshot_strategy()) {
        let known: HashSet<_> = accounts.iter().map(|a| a.id).collect();
        let expected: Vec<_> = entries
            .iter()
            .filter(|e| !known.contains(&e.account_id))
            .map(|e| e.id)
            .collect();

        let result = ReportService::aggregate(&accounts, &entries);
        prop_assert_eq!(result.unmatched_entries, expected);
    }

    /// Expense metrics are never negative, whatever the entry direction.
    #[test]
    fn prop_expense_metrics_non_negative((accounts, entries) in snapshot_strategy()) {
        let result = ReportService::aggregate(&accounts, &entries);
        prop_assert!(result.metrics.program_expenses >= Decimal::ZERO);
        prop_assert!(result.metrics.administrative_costs >= Decimal::ZERO);
        prop_assert!(result.metrics.grant_allocations >= Decimal::ZERO);
    }

    /// Spending ratios stay within [0, 100].
    #[test]
    fn prop_spending_ratios_bounded(
        program in amount_strategy(),
        admin in amount_strategy(),
    ) {
        let metrics = AggregateMetrics {
            program_expenses: program,
            administrative_costs: admin,
            ..AggregateMetrics::default()
        };
        let ratios = ReportService::calculate_ratios(&metrics);
        prop_assert!(ratios.program_efficiency >= Decimal::ZERO);
        prop_assert!(ratios.program_efficiency <= dec!(100));
        prop_assert!(ratios.administrative_ratio >= Decimal::ZERO);
        prop_assert!(ratios.administrative_ratio <= dec!(100));
    }
}
