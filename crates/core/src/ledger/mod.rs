//! Double-entry bookkeeping types.
//!
//! The ledger is a conventional relational double-entry table; this module
//! only defines the shapes that reports read:
//! - Chart of accounts entries and their reporting categories
//! - Ledger entries (debits and credits)

pub mod account;
pub mod entry;

pub use account::{Account, AccountCategory, AccountType};
pub use entry::{EntryType, LedgerEntry};
