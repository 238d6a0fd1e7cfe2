//! Core business logic for SOLVY.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, classification rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Chart of accounts and double-entry ledger types
//! - `reports` - NGO transparency report aggregation
//! - `domain` - Host resolution for the `solvy.chain` domain family

pub mod domain;
pub mod ledger;
pub mod reports;
