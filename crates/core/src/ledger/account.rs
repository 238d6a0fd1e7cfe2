//! Chart of accounts domain types.

use serde::{Deserialize, Serialize};
use solvy_shared::types::AccountId;

/// Account type in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Revenue account (donations, grants received, fees).
    Revenue,
    /// Expense account.
    Expense,
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity / net assets account.
    Equity,
}

/// Reporting category of an account.
///
/// Stored on the account when it is created and used by the transparency
/// report to decide which total an entry contributes to. Renaming an account
/// never changes its category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Contributed revenue: grants and donations received.
    Donation,
    /// Spending that directly funds mission activities.
    ProgramService,
    /// Funds disbursed to external grant recipients.
    GrantAllocation,
    /// Administrative overhead.
    Administrative,
    /// Not part of any transparency metric.
    #[default]
    Unclassified,
}

impl AccountCategory {
    /// Infers a category from an account's type and display name.
    ///
    /// Only used when an account is created without an explicit category, so
    /// legacy charts of accounts keep classifying the way they always did.
    /// Matching is case-sensitive and the first rule that matches wins:
    ///
    /// 1. revenue named "Grant" or "Donation" is a donation;
    /// 2. expense named "Program" is a program service;
    /// 3. expense named "Grant" is a grant allocation;
    /// 4. expense named "Administrative" is administrative.
    #[must_use]
    pub fn infer(account_type: AccountType, name: &str) -> Self {
        match account_type {
            AccountType::Revenue if name.contains("Grant") || name.contains("Donation") => {
                Self::Donation
            }
            AccountType::Expense if name.contains("Program") => Self::ProgramService,
            AccountType::Expense if name.contains("Grant") => Self::GrantAllocation,
            AccountType::Expense if name.contains("Administrative") => Self::Administrative,
            _ => Self::Unclassified,
        }
    }
}

/// An account in an organization's chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Human-facing account number (e.g. "4100").
    pub account_number: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Reporting category.
    pub category: AccountCategory,
}

impl Account {
    /// Creates an account, inferring its category from the name when none is given.
    #[must_use]
    pub fn new(
        account_number: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        category: Option<AccountCategory>,
    ) -> Self {
        let name = name.into();
        let category = category.unwrap_or_else(|| AccountCategory::infer(account_type, &name));
        Self {
            id: AccountId::new(),
            account_number: account_number.into(),
            name,
            account_type,
            category,
        }
    }
}
