//! Shared types, errors, and configuration for SOLVY.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes for reporting units
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DnsConfig, DomainConfig, ReportingConfig};
pub use error::{AppError, AppResult};
