//! Request middleware.

pub mod domain;

pub use domain::{ResolvedDomain, domain_middleware};
