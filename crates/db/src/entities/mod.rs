//! `SeaORM` entity definitions.

pub mod chart_of_accounts;
pub mod financial_reports;
pub mod ledger_entries;
pub mod organizations;
pub mod sea_orm_active_enums;
pub mod transactions;
