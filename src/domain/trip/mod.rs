//! Trip aggregate: the nested planning data model and its mutation engine.
//!
//! `Trip` owns days (which own activities), expenses and documents.
//! All edits go through the pure transforms in [`mutation`]; the
//! session controller commits their results.

mod aggregate;
pub mod currency;
mod day;
mod document;
mod expense;
pub mod mutation;

pub use aggregate::Trip;
pub use currency::{CurrencyConfig, DEFAULT_EXPENSE_CATEGORIES, HOME_CURRENCY};
pub use day::{
    Activity, ActivityType, Attachment, AttachmentKind, DayItinerary, TransportDetails,
    TransportKind,
};
pub use document::TripDocument;
pub use expense::Expense;
pub use mutation::{ActivityDraft, DocumentDraft, ExpenseDraft, TripDraft};
