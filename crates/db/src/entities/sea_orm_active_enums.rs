//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use solvy_core::ledger;

/// `account_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Revenue.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Asset.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "equity")]
    Equity,
}

/// `account_category` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_category")]
pub enum AccountCategory {
    /// Grants and donations received.
    #[sea_orm(string_value = "donation")]
    Donation,
    /// Program services.
    #[sea_orm(string_value = "program_service")]
    ProgramService,
    /// Grants disbursed.
    #[sea_orm(string_value = "grant_allocation")]
    GrantAllocation,
    /// Administrative overhead.
    #[sea_orm(string_value = "administrative")]
    Administrative,
    /// Not reported.
    #[sea_orm(string_value = "unclassified")]
    Unclassified,
}

/// `entry_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_type")]
pub enum EntryType {
    /// Debit.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit.
    #[sea_orm(string_value = "credit")]
    Credit,
}

impl From<AccountType> for ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
        }
    }
}

impl From<ledger::AccountType> for AccountType {
    fn from(value: ledger::AccountType) -> Self {
        match value {
            ledger::AccountType::Revenue => Self::Revenue,
            ledger::AccountType::Expense => Self::Expense,
            ledger::AccountType::Asset => Self::Asset,
            ledger::AccountType::Liability => Self::Liability,
            ledger::AccountType::Equity => Self::Equity,
        }
    }
}

impl From<AccountCategory> for ledger::AccountCategory {
    fn from(value: AccountCategory) -> Self {
        match value {
            AccountCategory::Donation => Self::Donation,
            AccountCategory::ProgramService => Self::ProgramService,
            AccountCategory::GrantAllocation => Self::GrantAllocation,
            AccountCategory::Administrative => Self::Administrative,
            AccountCategory::Unclassified => Self::Unclassified,
        }
    }
}

impl From<ledger::AccountCategory> for AccountCategory {
    fn from(value: ledger::AccountCategory) -> Self {
        match value {
            ledger::AccountCategory::Donation => Self::Donation,
            ledger::AccountCategory::ProgramService => Self::ProgramService,
            ledger::AccountCategory::GrantAllocation => Self::GrantAllocation,
            ledger::AccountCategory::Administrative => Self::Administrative,
            ledger::AccountCategory::Unclassified => Self::Unclassified,
        }
    }
}

impl From<EntryType> for ledger::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Debit => Self::Debit,
            EntryType::Credit => Self::Credit,
        }
    }
}

impl From<ledger::EntryType> for EntryType {
    fn from(value: ledger::EntryType) -> Self {
        match value {
            ledger::EntryType::Debit => Self::Debit,
            ledger::EntryType::Credit => Self::Credit,
        }
    }
}
