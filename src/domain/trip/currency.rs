//! Currency configuration and rate resolution.
//!
//! All budgets and converted totals are expressed in one fixed home
//! currency (BRL). Foreign currencies carry a user-entered rate; rates
//! are a snapshot taken when an expense is saved, not a live reference.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::foundation::ValidationError;

/// The single reference currency for budgets and converted totals.
pub const HOME_CURRENCY: &str = "BRL";

/// Fixed category set offered for expenses. `Expense.category` stays
/// free text; this list only seeds the presentation layer.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 7] = [
    "Alimentação",
    "Transporte",
    "Hospedagem",
    "Lazer",
    "Compras",
    "Educação",
    "Outros",
];

/// A foreign currency the trip budgets against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO-style code, e.g. "USD".
    pub code: String,

    /// Units of home currency per 1 unit of this currency.
    pub rate_to_brl: f64,
}

impl CurrencyConfig {
    /// Creates a currency configuration.
    pub fn new(code: impl Into<String>, rate_to_brl: f64) -> Self {
        Self {
            code: code.into(),
            rate_to_brl,
        }
    }
}

/// Validates a currency table: codes non-empty and unique, rates
/// positive and finite.
pub fn validate_currencies(currencies: &[CurrencyConfig]) -> Result<(), ValidationError> {
    let mut seen: Vec<&str> = Vec::with_capacity(currencies.len());
    for config in currencies {
        if config.code.trim().is_empty() {
            return Err(ValidationError::empty_field("currency code"));
        }
        if !config.rate_to_brl.is_finite() || config.rate_to_brl <= 0.0 {
            return Err(ValidationError::invalid_amount(
                "rate_to_brl",
                format!("rate for '{}' must be a positive number", config.code),
            ));
        }
        if seen.contains(&config.code.as_str()) {
            return Err(ValidationError::DuplicateCurrency {
                code: config.code.clone(),
            });
        }
        seen.push(&config.code);
    }
    Ok(())
}

/// Resolves the home-currency rate for an expense at write time.
///
/// The home currency always resolves to 1.0. An unknown foreign code
/// also falls back to 1.0, with a warning rather than a hard error.
pub fn resolve_rate(currencies: &[CurrencyConfig], code: &str) -> f64 {
    if code == HOME_CURRENCY {
        return 1.0;
    }
    match currencies.iter().find(|c| c.code == code) {
        Some(config) => config.rate_to_brl,
        None => {
            warn!(currency = code, "no configured rate, falling back to 1.0");
            1.0
        }
    }
}
