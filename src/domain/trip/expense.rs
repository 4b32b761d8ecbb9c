//! Expense records tracked against the trip budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ExpenseId;

/// A single expense, recorded in some currency and converted to the
/// home currency at the moment it was saved.
///
/// # Invariants
///
/// - `amount_in_brl` equals `amount * rate` where `rate` is the trip's
///   configured rate for `currency` *as of the save*; it is not
///   recomputed when the trip's currency table changes later.
/// - `date` is the transaction timestamp and need not fall within the
///   trip's calendar range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub amount_in_brl: f64,
}
