//! In-memory trip store.
//!
//! Backs tests and ephemeral runs; same contract as the durable stores.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::{PersistenceError, TripStore};

/// In-memory storage of trip records keyed by trip id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTripStore {
    records: Arc<RwLock<HashMap<TripId, (UserId, Trip)>>>,
}

impl InMemoryTripStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes everything (useful for tests).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Number of stored trips across all owners.
    pub async fn trip_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn list_trips(&self, owner: &UserId) -> Result<Vec<Trip>, PersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|(record_owner, _)| record_owner == owner)
            .map(|(_, trip)| trip.clone())
            .collect())
    }

    async fn upsert_trip(&self, trip: &Trip, owner: &UserId) -> Result<(), PersistenceError> {
        let mut records = self.records.write().await;
        records.insert(*trip.id(), (owner.clone(), trip.clone()));
        Ok(())
    }

    async fn delete_trip(&self, id: &TripId) -> Result<(), PersistenceError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::{mutation, TripDraft};
    use chrono::NaiveDate;

    fn owner(key: &str) -> UserId {
        UserId::new(key).unwrap()
    }

    fn sample_trip() -> Trip {
        mutation::apply_trip_fields(
            None,
            TripDraft {
                destination: "Chile".to_string(),
                cities: vec![],
                start_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap(),
                budget_brl: 3000.0,
                currencies: vec![],
                cover_image: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn round_trip_and_owner_scoping() {
        let store = InMemoryTripStore::new();
        let trip = sample_trip();
        store.upsert_trip(&trip, &owner("u1")).await.unwrap();

        assert_eq!(store.list_trips(&owner("u1")).await.unwrap(), vec![trip]);
        assert!(store.list_trips(&owner("u2")).await.unwrap().is_empty());
        assert_eq!(store.trip_count().await, 1);
    }

    #[tokio::test]
    async fn upsert_with_same_id_replaces() {
        let store = InMemoryTripStore::new();
        let trip = sample_trip();
        store.upsert_trip(&trip, &owner("u1")).await.unwrap();
        let updated = mutation::update_notes(&trip, "atualizado");
        store.upsert_trip(&updated, &owner("u1")).await.unwrap();

        let listed = store.list_trips(&owner("u1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].notes(), "atualizado");
    }

    #[tokio::test]
    async fn delete_unknown_id_is_ok() {
        let store = InMemoryTripStore::new();
        store.delete_trip(&TripId::new()).await.unwrap();
    }
}
