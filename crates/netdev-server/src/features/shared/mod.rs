//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: 0-indexed pagination types and helpers
//! - **validation**: field validation that collects every failure
//! - **test_helpers**: test fixtures (test-only)

pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{Paginated, PaginationMetadata, PaginationParams};
pub use validation::ValidationErrors;
