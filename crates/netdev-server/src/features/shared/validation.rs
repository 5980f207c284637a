//! Shared validation utilities
//!
//! Validation never stops at the first problem: every check records into a
//! [`ValidationErrors`] collector so the caller can report all offending
//! fields at once.
//!
//! # Examples
//!
//! ```rust,ignore
//! use netdev_server::features::shared::validation::{require_text, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! let name = require_text(&mut errors, "name", Some("  "), 100);
//! assert!(name.is_none());
//! assert!(errors.into_result().is_err());
//! ```

use netdev_common::CommonError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Field-level validation failures, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("Validation failed: {}", summary(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

fn summary(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{} {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector holding a single failure
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a failure; the first message for a field wins
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Validate a required text field
///
/// # Rules
/// - Must be present and not blank after trimming
/// - Must not exceed `max_length` characters (after trimming)
///
/// Returns the trimmed value when valid.
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_length: usize,
) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, "must not be blank");
            None
        },
        Some(text) => check_length(errors, field, text, max_length),
    }
}

/// Validate an optional text field
///
/// Blank values are treated as absent. Returns the trimmed value when present
/// and within `max_length` characters.
pub fn optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_length: usize,
) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(text) => check_length(errors, field, text, max_length),
    }
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &str,
    text: &str,
    max_length: usize,
) -> Option<String> {
    if text.chars().count() > max_length {
        errors.add(field, format!("must be at most {} characters", max_length));
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse an enumeration field, case-insensitively
///
/// A missing value is only an error when `required` is set. Unknown values
/// record the parse message, which lists the accepted values.
pub fn parse_enum<T>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    required: bool,
) -> Option<T>
where
    T: FromStr<Err = CommonError>,
{
    match value.map(str::trim) {
        None | Some("") => {
            if required {
                errors.add(field, "is required");
            }
            None
        },
        Some(raw) => match raw.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                errors.add(field, e.to_string());
                None
            },
        },
    }
}
