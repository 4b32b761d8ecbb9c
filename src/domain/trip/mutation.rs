//! Trip mutation engine.
//!
//! Pure, side-effect-free transforms: each takes an immutable prior
//! `Trip` (or `None` for creation) plus a typed edit intent and returns
//! a new, invariant-preserving `Trip`. No transform mutates its input.
//!
//! Validation failures are returned synchronously and the prior state
//! is untouched; deletes of absent ids are no-ops that return the trip
//! structurally unchanged.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::foundation::{
    ActivityId, DayId, DocumentId, ExpenseId, TimeOfDay, TripId, ValidationError,
};
use crate::domain::trip::{
    currency::{resolve_rate, validate_currencies},
    Activity, ActivityType, Attachment, CurrencyConfig, DayItinerary, Expense, Trip,
    TransportDetails, TripDocument,
};

// ─────────────────────────────────────────────────────────────────────────────
// Edit intents
// ─────────────────────────────────────────────────────────────────────────────

/// Core trip fields for creation or update. Days are derived from the
/// date range; expenses, documents and notes are never part of this
/// intent and carry over from the prior trip.
#[derive(Debug, Clone)]
pub struct TripDraft {
    pub destination: String,
    pub cities: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_brl: f64,
    pub currencies: Vec<CurrencyConfig>,
    pub cover_image: Option<String>,
}

/// Payload for adding or editing an activity within a day.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub time: TimeOfDay,
    pub title: String,
    pub description: Option<String>,
    pub kind: ActivityType,
    pub location: Option<String>,
    pub cost: Option<f64>,
    pub attachments: Vec<Attachment>,
    pub transport: Option<TransportDetails>,
}

/// Payload for adding or editing an expense.
///
/// `date` is the transaction timestamp; when absent, add stamps the
/// current time and edit preserves the original.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

/// Payload for adding or editing a trip document.
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    pub title: String,
    pub image: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Create / update core fields
// ─────────────────────────────────────────────────────────────────────────────

/// Creates a trip (`prior = None`) or updates its core fields,
/// re-deriving the day list from the date range.
///
/// Days are matched by ordinal position from the start: a prior day at
/// position `i` keeps its id and activities with only `date` and
/// `day_number` refreshed; positions beyond the prior span get fresh
/// empty days; prior days beyond the new span are dropped along with
/// their activities.
///
/// # Errors
///
/// - `EmptyField` if `destination` is blank
/// - `InvalidDateRange` if `end_date < start_date` (inverted ranges are
///   rejected outright rather than silently reordered)
/// - `InvalidAmount` if the budget is negative or not finite
/// - `DuplicateCurrency` / `InvalidAmount` for a bad currency table
pub fn apply_trip_fields(prior: Option<&Trip>, draft: TripDraft) -> Result<Trip, ValidationError> {
    if draft.destination.trim().is_empty() {
        return Err(ValidationError::empty_field("destination"));
    }
    if draft.end_date < draft.start_date {
        return Err(ValidationError::InvalidDateRange {
            start: draft.start_date,
            end: draft.end_date,
        });
    }
    if !draft.budget_brl.is_finite() || draft.budget_brl < 0.0 {
        return Err(ValidationError::invalid_amount(
            "budget_brl",
            "budget must be a non-negative number",
        ));
    }
    validate_currencies(&draft.currencies)?;

    let span = (draft.end_date - draft.start_date).num_days() + 1;
    let days: Vec<DayItinerary> = (0..span)
        .map(|i| {
            let date = draft.start_date + Duration::days(i);
            let day_number = (i + 1) as u32;
            match prior.and_then(|t| t.days().get(i as usize)) {
                Some(existing) => DayItinerary {
                    id: existing.id,
                    date,
                    day_number,
                    activities: existing.activities.clone(),
                },
                None => DayItinerary::empty(date, day_number),
            }
        })
        .collect();

    let cities: Vec<String> = draft
        .cities
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    Ok(Trip::reconstitute(
        prior.map(|t| *t.id()).unwrap_or_default(),
        draft.destination.trim().to_string(),
        cities,
        draft.start_date,
        draft.end_date,
        draft.budget_brl,
        draft.currencies,
        draft.cover_image,
        days,
        prior.map(|t| t.expenses().to_vec()).unwrap_or_default(),
        prior.map(|t| t.documents().to_vec()).unwrap_or_default(),
        prior.map(|t| t.notes().to_string()).unwrap_or_default(),
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Activities
// ─────────────────────────────────────────────────────────────────────────────

/// Appends an activity to the matching day and re-sorts that day by
/// time. An unknown `day_id` is a no-op.
///
/// # Errors
///
/// - `EmptyField` if the title is blank
pub fn add_activity(
    trip: &Trip,
    day_id: &DayId,
    draft: ActivityDraft,
) -> Result<Trip, ValidationError> {
    validate_activity_title(&draft.title)?;

    let activity = Activity {
        id: ActivityId::new(),
        time: draft.time,
        title: draft.title.trim().to_string(),
        description: draft.description,
        kind: draft.kind,
        location: draft.location,
        cost: draft.cost,
        attachments: draft.attachments,
        transport: draft.transport,
    };

    Ok(replace_day(trip, day_id, |day| {
        day.activities.push(activity);
        day.sort_activities();
    }))
}

/// Replaces the activity with a matching id within the matching day,
/// then re-sorts by time. Unknown day or activity ids are no-ops.
///
/// # Errors
///
/// - `EmptyField` if the replacement title is blank
pub fn edit_activity(
    trip: &Trip,
    day_id: &DayId,
    activity: Activity,
) -> Result<Trip, ValidationError> {
    validate_activity_title(&activity.title)?;

    Ok(replace_day(trip, day_id, |day| {
        if let Some(slot) = day.activities.iter_mut().find(|a| a.id == activity.id) {
            *slot = activity;
            day.sort_activities();
        }
    }))
}

/// Removes an activity by id from the matching day. Unknown day or
/// activity ids leave the trip structurally unchanged.
pub fn delete_activity(trip: &Trip, day_id: &DayId, activity_id: &ActivityId) -> Trip {
    replace_day(trip, day_id, |day| {
        day.activities.retain(|a| &a.id != activity_id);
    })
}

/// Rebuilds the day list with only the target day passed through `f`;
/// all other days are carried over untouched.
fn replace_day<F>(trip: &Trip, day_id: &DayId, f: F) -> Trip
where
    F: FnOnce(&mut DayItinerary),
{
    let mut f = Some(f);
    let days = trip
        .days()
        .iter()
        .map(|day| {
            if &day.id == day_id {
                let mut next = day.clone();
                if let Some(f) = f.take() {
                    f(&mut next);
                }
                next
            } else {
                day.clone()
            }
        })
        .collect();
    trip.with_days(days)
}

fn validate_activity_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Expenses
// ─────────────────────────────────────────────────────────────────────────────

/// Adds an expense, converting to home currency with the rate in effect
/// right now. The converted amount is a snapshot: later rate edits do
/// not touch it.
///
/// # Errors
///
/// - `EmptyField` if the description is blank
/// - `InvalidAmount` if the amount is not a positive finite number
pub fn add_expense(trip: &Trip, draft: ExpenseDraft) -> Result<Trip, ValidationError> {
    validate_expense_draft(&draft)?;

    let rate = resolve_rate(trip.currencies(), &draft.currency);
    let expense = Expense {
        id: ExpenseId::new(),
        description: draft.description.trim().to_string(),
        amount: draft.amount,
        currency: draft.currency,
        category: draft.category,
        date: draft.date.unwrap_or_else(Utc::now),
        amount_in_brl: draft.amount * rate,
    };

    let mut expenses = trip.expenses().to_vec();
    expenses.push(expense);
    Ok(trip.with_expenses(expenses))
}

/// Replaces the expense with a matching id, re-deriving the converted
/// amount from the current rate table. The original transaction
/// timestamp is preserved unless the draft sets one explicitly. An
/// unknown id is a no-op.
///
/// # Errors
///
/// Same validation as [`add_expense`].
pub fn edit_expense(
    trip: &Trip,
    expense_id: &ExpenseId,
    draft: ExpenseDraft,
) -> Result<Trip, ValidationError> {
    validate_expense_draft(&draft)?;

    let rate = resolve_rate(trip.currencies(), &draft.currency);
    let expenses = trip
        .expenses()
        .iter()
        .map(|existing| {
            if &existing.id == expense_id {
                Expense {
                    id: existing.id,
                    description: draft.description.trim().to_string(),
                    amount: draft.amount,
                    currency: draft.currency.clone(),
                    category: draft.category.clone(),
                    date: draft.date.unwrap_or(existing.date),
                    amount_in_brl: draft.amount * rate,
                }
            } else {
                existing.clone()
            }
        })
        .collect();
    Ok(trip.with_expenses(expenses))
}

/// Removes an expense by id; a no-op if absent.
pub fn delete_expense(trip: &Trip, expense_id: &ExpenseId) -> Trip {
    let expenses = trip
        .expenses()
        .iter()
        .filter(|e| &e.id != expense_id)
        .cloned()
        .collect();
    trip.with_expenses(expenses)
}

fn validate_expense_draft(draft: &ExpenseDraft) -> Result<(), ValidationError> {
    if draft.description.trim().is_empty() {
        return Err(ValidationError::empty_field("description"));
    }
    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(ValidationError::invalid_amount(
            "amount",
            "amount must be a positive number",
        ));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

/// Adds a document with the checklist flag off.
///
/// # Errors
///
/// - `EmptyField` if the title is blank
pub fn add_document(trip: &Trip, draft: DocumentDraft) -> Result<Trip, ValidationError> {
    validate_document_title(&draft.title)?;

    let document = TripDocument {
        id: DocumentId::new(),
        title: draft.title.trim().to_string(),
        is_checked: false,
        image: draft.image,
    };

    let mut documents = trip.documents().to_vec();
    documents.push(document);
    Ok(trip.with_documents(documents))
}

/// Replaces title/image of the matching document, preserving its
/// checklist flag. An unknown id is a no-op.
///
/// # Errors
///
/// - `EmptyField` if the replacement title is blank
pub fn edit_document(
    trip: &Trip,
    document_id: &DocumentId,
    draft: DocumentDraft,
) -> Result<Trip, ValidationError> {
    validate_document_title(&draft.title)?;

    let documents = trip
        .documents()
        .iter()
        .map(|existing| {
            if &existing.id == document_id {
                TripDocument {
                    id: existing.id,
                    title: draft.title.trim().to_string(),
                    is_checked: existing.is_checked,
                    image: draft.image.clone(),
                }
            } else {
                existing.clone()
            }
        })
        .collect();
    Ok(trip.with_documents(documents))
}

/// Removes a document by id; a no-op if absent.
pub fn delete_document(trip: &Trip, document_id: &DocumentId) -> Trip {
    let documents = trip
        .documents()
        .iter()
        .filter(|d| &d.id != document_id)
        .cloned()
        .collect();
    trip.with_documents(documents)
}

/// Flips the checklist flag of the matching document without touching
/// other fields. An unknown id is a no-op.
pub fn toggle_document_check(trip: &Trip, document_id: &DocumentId) -> Trip {
    let documents = trip
        .documents()
        .iter()
        .map(|d| {
            if &d.id == document_id {
                TripDocument {
                    is_checked: !d.is_checked,
                    ..d.clone()
                }
            } else {
                d.clone()
            }
        })
        .collect();
    trip.with_documents(documents)
}

fn validate_document_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Notes
// ─────────────────────────────────────────────────────────────────────────────

/// Whole-field notes replacement; free text, no validation.
pub fn update_notes(trip: &Trip, notes: impl Into<String>) -> Trip {
    trip.with_notes(notes.into())
}
