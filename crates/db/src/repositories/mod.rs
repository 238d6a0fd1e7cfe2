//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod organization;
pub mod report;
pub mod transaction;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use organization::OrganizationRepository;
pub use report::{
    ReportRepository, ReportSnapshot, ReportStoreError, StoredReport, StoredReportSummary,
};
pub use transaction::{
    CreateLedgerEntryInput, CreateTransactionInput, TransactionError, TransactionRepository,
};
