//! Trip store port: the durable side of the persistence boundary.
//!
//! Implemented twice - a local single-device JSON store and a remote
//! multi-user PostgreSQL document store. The mutation engine and the
//! session controller depend only on this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{TripId, UserId};
use crate::domain::trip::Trip;

/// Errors surfaced by trip store operations.
///
/// Failures propagate to the caller; the controller does not retry
/// automatically.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to serialize trip record: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for listing, upserting and deleting trip records.
///
/// # Contract
///
/// - `list_trips` returns only trips tagged with `owner`; empty when
///   the owner has none.
/// - `upsert_trip` creates when the id is unknown and otherwise
///   replaces the stored value wholesale (nested arrays are replaced,
///   never merged); the record is tagged with `owner` for scoping.
///   Last write wins under concurrent upserts.
/// - `delete_trip` is idempotent; deleting an unknown id is not an
///   error. Deleting a trip deletes everything it owns.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Returns every trip owned by `owner`.
    async fn list_trips(&self, owner: &UserId) -> Result<Vec<Trip>, PersistenceError>;

    /// Creates or fully replaces the stored record for `trip.id()`.
    async fn upsert_trip(&self, trip: &Trip, owner: &UserId) -> Result<(), PersistenceError>;

    /// Removes the record for `id`, cascading to everything the trip owns.
    async fn delete_trip(&self, id: &TripId) -> Result<(), PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn TripStore) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn TripStore>>();
    }

    #[test]
    fn persistence_errors_render_their_cause() {
        let err = PersistenceError::PermissionDenied("rules".to_string());
        assert!(err.to_string().contains("rules"));
        let err = PersistenceError::Io("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }
}
