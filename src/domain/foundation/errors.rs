//! Error types for the domain layer.
//!
//! Validation failures are raised synchronously by the mutation engine,
//! never reach persistence, and leave the prior trip state untouched.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that occur while validating an edit intent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' has invalid amount: {reason}")]
    InvalidAmount { field: String, reason: String },

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Currency '{code}' is configured more than once")]
    DuplicateCurrency { code: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid amount validation error.
    pub fn invalid_amount(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidAmount {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::empty_field("destination");
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn date_range_error_shows_both_dates() {
        let err = ValidationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-05"));
        assert!(msg.contains("2024-03-01"));
    }
}
