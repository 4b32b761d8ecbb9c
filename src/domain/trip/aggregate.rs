//! Trip aggregate entity.
//!
//! A trip exclusively owns its days, expenses and documents; deleting
//! the trip deletes everything under it. No entity is shared by
//! reference between trips.
//!
//! Trips are only constructed and modified through the mutation engine
//! (`mutation` module) or reconstituted from persistence; the fields
//! themselves stay private.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DayId, TripId};
use crate::domain::trip::{CurrencyConfig, DayItinerary, Expense, TripDocument};

/// Trip aggregate - root of the planning data model.
///
/// # Invariants
///
/// - `end_date >= start_date`
/// - `days` covers exactly the calendar days in `[start_date, end_date]`,
///   ordered by `day_number` ascending starting at 1
/// - `currencies` holds at most one entry per code
/// - `budget_brl` is non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    id: TripId,
    destination: String,
    cities: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget_brl: f64,
    currencies: Vec<CurrencyConfig>,
    cover_image: Option<String>,
    days: Vec<DayItinerary>,
    expenses: Vec<Expense>,
    documents: Vec<TripDocument>,
    notes: String,
}

impl Trip {
    /// Reconstitute a trip from persistence or from the mutation engine
    /// (no validation; callers are responsible for the invariants).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TripId,
        destination: String,
        cities: Vec<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget_brl: f64,
        currencies: Vec<CurrencyConfig>,
        cover_image: Option<String>,
        days: Vec<DayItinerary>,
        expenses: Vec<Expense>,
        documents: Vec<TripDocument>,
        notes: String,
    ) -> Self {
        Self {
            id,
            destination,
            cities,
            start_date,
            end_date,
            budget_brl,
            currencies,
            cover_image,
            days,
            expenses,
            documents,
            notes,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn budget_brl(&self) -> f64 {
        self.budget_brl
    }

    pub fn currencies(&self) -> &[CurrencyConfig] {
        &self.currencies
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    pub fn days(&self) -> &[DayItinerary] {
        &self.days
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn documents(&self) -> &[TripDocument] {
        &self.documents
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Looks up a day by id.
    pub fn day(&self, day_id: &DayId) -> Option<&DayItinerary> {
        self.days.iter().find(|d| &d.id == day_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of calendar days the trip spans.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total spent across all expenses, in home currency.
    pub fn total_spent_brl(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount_in_brl).sum()
    }

    /// Fraction of the budget consumed, capped at 1.0. Returns 0 for a
    /// zero budget.
    pub fn budget_used_fraction(&self) -> f64 {
        if self.budget_brl <= 0.0 {
            return 0.0;
        }
        (self.total_spent_brl() / self.budget_brl).min(1.0)
    }

    /// Days until the trip starts: negative once it has started.
    pub fn days_until_start(&self, today: NaiveDate) -> i64 {
        (self.start_date - today).num_days()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Piecewise replacement (used by the mutation engine)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn with_days(&self, days: Vec<DayItinerary>) -> Self {
        let mut next = self.clone();
        next.days = days;
        next
    }

    pub(crate) fn with_expenses(&self, expenses: Vec<Expense>) -> Self {
        let mut next = self.clone();
        next.expenses = expenses;
        next
    }

    pub(crate) fn with_documents(&self, documents: Vec<TripDocument>) -> Self {
        let mut next = self.clone();
        next.documents = documents;
        next
    }

    pub(crate) fn with_notes(&self, notes: String) -> Self {
        let mut next = self.clone();
        next.notes = notes;
        next
    }
}
