//! Account repository for chart of accounts database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use solvy_core::ledger::{self, Account, AccountCategory};
use solvy_shared::types::AccountId;
use uuid::Uuid;

use crate::entities::chart_of_accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account number already exists in organization.
    #[error("Account number '{0}' already exists")]
    DuplicateNumber(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account number, unique within the organization.
    pub account_number: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: ledger::AccountType,
    /// Reporting category. Inferred from the name when absent.
    pub category: Option<AccountCategory>,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account in an organization's chart of accounts.
    ///
    /// The reporting category is fixed here; renaming the account later does
    /// not reclassify it.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNumber` if the account number is taken, or a database error.
    pub async fn create_account(
        &self,
        organization_id: Uuid,
        input: CreateAccountInput,
    ) -> Result<Account, AccountError> {
        let taken = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
            .filter(chart_of_accounts::Column::AccountNumber.eq(input.account_number.as_str()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(AccountError::DuplicateNumber(input.account_number));
        }

        let account = Account::new(
            input.account_number,
            input.name,
            input.account_type,
            input.category,
        );
        let now = chrono::Utc::now().into();

        let model = chart_of_accounts::ActiveModel {
            id: Set(account.id.into_inner()),
            organization_id: Set(organization_id),
            account_number: Set(account.account_number.clone()),
            name: Set(account.name.clone()),
            account_type: Set(account.account_type.into()),
            account_category: Set(account.category.into()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(
            account_id = %model.id,
            category = ?account.category,
            "Created account"
        );

        Ok(account)
    }

    /// Lists the active accounts of an organization, ordered by account number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self, organization_id: Uuid) -> Result<Vec<Account>, DbErr> {
        let accounts = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::OrganizationId.eq(organization_id))
            .filter(chart_of_accounts::Column::IsActive.eq(true))
            .order_by_asc(chart_of_accounts::Column::AccountNumber)
            .all(&self.db)
            .await?;

        Ok(accounts.into_iter().map(to_account).collect())
    }
}

/// Converts a chart of accounts row into the domain account.
pub fn to_account(model: chart_of_accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        account_number: model.account_number,
        name: model.name,
        account_type: model.account_type.into(),
        category: model.account_category.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{AccountCategory as DbCategory, AccountType};

    #[test]
    fn test_to_account_keeps_stored_category() {
        let now = chrono::Utc::now().into();
        let model = chart_of_accounts::Model {
            id: Uuid::nil(),
            organization_id: Uuid::nil(),
            account_number: "5100".to_string(),
            name: "Direct Services".to_string(),
            account_type: AccountType::Expense,
            account_category: DbCategory::ProgramService,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let account = to_account(model);

        assert_eq!(account.id, AccountId::from_uuid(Uuid::nil()));
        assert_eq!(account.account_type, ledger::AccountType::Expense);
        assert_eq!(account.category, AccountCategory::ProgramService);
    }
}
