//! Foundation types shared across the domain.
//!
//! Value objects only: identifiers, validation errors, authentication
//! primitives, and the time-of-day type used by itinerary scheduling.

mod auth;
mod errors;
mod ids;
mod time_of_day;

pub use auth::{default_avatar_url, AuthError, AuthenticatedUser, Credentials};
pub use errors::ValidationError;
pub use ids::{ActivityId, AttachmentId, DayId, DocumentId, ExpenseId, TripId, UserId};
pub use time_of_day::TimeOfDay;
