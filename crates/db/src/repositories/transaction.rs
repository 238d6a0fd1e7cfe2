//! Transaction repository for ledger database operations.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use solvy_core::ledger::{EntryType, LedgerEntry};
use solvy_core::reports::ReportingPeriod;
use solvy_shared::types::{AccountId, LedgerEntryId, TransactionId};
use uuid::Uuid;

use crate::entities::{chart_of_accounts, ledger_entries, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// A transaction needs at least two entries.
    #[error("Transaction must have at least 2 entries, got {0}")]
    InsufficientEntries(usize),

    /// Entry amounts must be positive.
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Debits and credits differ.
    #[error("Transaction is unbalanced: debits {debits} != credits {credits}")]
    Unbalanced {
        /// Total debits.
        debits: Decimal,
        /// Total credits.
        credits: Decimal,
    },

    /// Account does not exist in the organization's chart of accounts.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for one line of a new transaction.
#[derive(Debug, Clone)]
pub struct CreateLedgerEntryInput {
    /// Account to post to.
    pub account_id: Uuid,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional line memo.
    pub memo: Option<String>,
}

/// Input for a new double-entry transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Description.
    pub description: String,
    /// Optional external reference.
    pub reference: Option<String>,
    /// Entry lines; debits must equal credits.
    pub entries: Vec<CreateLedgerEntryInput>,
}

/// Transaction repository for ledger operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a balanced transaction and its entries atomically.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unbalanced or malformed input,
    /// `AccountNotFound` if an entry posts to an account outside the
    /// organization, or a database error. Nothing is written on error.
    pub async fn create_transaction(
        &self,
        organization_id: Uuid,
        input: CreateTransactionInput,
    ) -> Result<TransactionId, TransactionError> {
        validate_entries(&input.entries)?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();
        let transaction_id = Uuid::now_v7();

        transactions::ActiveModel {
            id: Set(transaction_id),
            organization_id: Set(organization_id),
            reference: Set(input.reference),
            description: Set(input.description),
            transaction_date: Set(input.transaction_date),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for entry in input.entries {
            chart_of_accounts::Entity::find_by_id(entry.account_id)
                .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
                .one(&txn)
                .await?
                .ok_or(TransactionError::AccountNotFound(entry.account_id))?;

            ledger_entries::ActiveModel {
                id: Set(Uuid::now_v7()),
                transaction_id: Set(transaction_id),
                account_id: Set(entry.account_id),
                entry_type: Set(entry.entry_type.into()),
                amount: Set(entry.amount),
                memo: Set(entry.memo),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(TransactionId::from_uuid(transaction_id))
    }

    /// Fetches every ledger entry of an organization's transactions dated
    /// within the period, in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_entries_in_period(
        &self,
        organization_id: Uuid,
        period: &ReportingPeriod,
    ) -> Result<Vec<LedgerEntry>, DbErr> {
        let transactions_with_dates: Vec<(Uuid, NaiveDate)> = transactions::Entity::find()
            .filter(transactions::Column::OrganizationId.eq(organization_id))
            .filter(transactions::Column::TransactionDate.gte(period.start()))
            .filter(transactions::Column::TransactionDate.lte(period.end()))
            .select_only()
            .column(transactions::Column::Id)
            .column(transactions::Column::TransactionDate)
            .into_tuple()
            .all(&self.db)
            .await?;

        if transactions_with_dates.is_empty() {
            return Ok(Vec::new());
        }

        let tx_date_map: HashMap<Uuid, NaiveDate> = transactions_with_dates.into_iter().collect();

        let entries = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::TransactionId.is_in(tx_date_map.keys().copied()))
            .order_by_asc(ledger_entries::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut result: Vec<LedgerEntry> = entries
            .into_iter()
            .filter_map(|entry| {
                let date = *tx_date_map.get(&entry.transaction_id)?;
                Some(to_ledger_entry(entry, date))
            })
            .collect();
        result.sort_by_key(|entry| entry.date);

        Ok(result)
    }
}

/// Converts a ledger entry row into the domain entry.
pub fn to_ledger_entry(model: ledger_entries::Model, date: NaiveDate) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        transaction_id: TransactionId::from_uuid(model.transaction_id),
        account_id: AccountId::from_uuid(model.account_id),
        entry_type: model.entry_type.into(),
        amount: model.amount,
        date,
    }
}

/// Validates the entry lines of a new transaction.
pub fn validate_entries(entries: &[CreateLedgerEntryInput]) -> Result<(), TransactionError> {
    if entries.len() < 2 {
        return Err(TransactionError::InsufficientEntries(entries.len()));
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    for entry in entries {
        if entry.amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount(entry.amount));
        }
        match entry.entry_type {
            EntryType::Debit => debits += entry.amount,
            EntryType::Credit => credits += entry.amount,
        }
    }

    if debits != credits {
        return Err(TransactionError::Unbalanced { debits, credits });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums;
    use rust_decimal_macros::dec;

    fn line(entry_type: EntryType, amount: Decimal) -> CreateLedgerEntryInput {
        CreateLedgerEntryInput {
            account_id: Uuid::now_v7(),
            entry_type,
            amount,
            memo: None,
        }
    }

    #[test]
    fn test_balanced_entries_accepted() {
        let entries = vec![
            line(EntryType::Debit, dec!(100)),
            line(EntryType::Credit, dec!(60)),
            line(EntryType::Credit, dec!(40)),
        ];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn test_single_entry_rejected() {
        let entries = vec![line(EntryType::Debit, dec!(100))];
        assert!(matches!(
            validate_entries(&entries),
            Err(TransactionError::InsufficientEntries(1))
        ));
    }

    #[test]
    fn test_unbalanced_rejected() {
        let entries = vec![
            line(EntryType::Debit, dec!(100)),
            line(EntryType::Credit, dec!(99.99)),
        ];
        assert!(matches!(
            validate_entries(&entries),
            Err(TransactionError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let entries = vec![
            line(EntryType::Debit, dec!(0)),
            line(EntryType::Credit, dec!(0)),
        ];
        assert!(matches!(
            validate_entries(&entries),
            Err(TransactionError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_to_ledger_entry_carries_transaction_date() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let model = ledger_entries::Model {
            id: Uuid::nil(),
            transaction_id: Uuid::nil(),
            account_id: Uuid::nil(),
            entry_type: sea_orm_active_enums::EntryType::Credit,
            amount: dec!(1000),
            memo: None,
            created_at: chrono::Utc::now().into(),
        };

        let entry = to_ledger_entry(model, date);

        assert_eq!(entry.date, date);
        assert_eq!(entry.entry_type, EntryType::Credit);
        assert_eq!(entry.signed_amount(), dec!(1000));
    }
}
