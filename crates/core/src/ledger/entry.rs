//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solvy_shared::types::{AccountId, LedgerEntryId, TransactionId};

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

/// A single debit or credit line of a double-entry transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The transaction this entry belongs to.
    pub transaction_id: TransactionId,
    /// The account affected by this entry.
    pub account_id: AccountId,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Unsigned amount in the organization's currency.
    pub amount: Decimal,
    /// Date of the owning transaction.
    pub date: NaiveDate,
}

impl LedgerEntry {
    /// Returns true for debit entries.
    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.entry_type == EntryType::Debit
    }

    /// Returns the amount signed from the credit side: credits positive,
    /// debits negative.
    ///
    /// Revenue accounts are credit-normal, so this is the entry's contribution
    /// to a revenue balance.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => -self.amount,
            EntryType::Credit => self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(entry_type: EntryType, amount: Decimal) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            transaction_id: TransactionId::new(),
            account_id: AccountId::new(),
            entry_type,
            amount,
            date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        }
    }

    #[test]
    fn test_credit_is_positive() {
        let credit = entry(EntryType::Credit, dec!(1000));
        assert!(!credit.is_debit());
        assert_eq!(credit.signed_amount(), dec!(1000));
    }

    #[test]
    fn test_debit_is_negative() {
        let debit = entry(EntryType::Debit, dec!(250.50));
        assert!(debit.is_debit());
        assert_eq!(debit.signed_amount(), dec!(-250.50));
    }
}
