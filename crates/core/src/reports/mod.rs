//! Financial report generation.
//!
//! This module provides pure business logic for the NGO transparency report:
//! - Aggregating ledger entries into donation, program, grant and overhead totals
//! - Deriving efficiency ratios
//! - Summarizing transactions and reconciliation status

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
