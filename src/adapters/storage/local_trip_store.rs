//! Local single-device trip store.
//!
//! One JSON file per trip under `<data_dir>/trips/`, each holding the
//! serialized trip plus the injected owner key. Corrupt files are
//! skipped on list with a warning rather than failing the whole query.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use crate::domain::foundation::{TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::{PersistenceError, TripStore};

/// Persisted record shape: the trip document tagged with its owner.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTrip {
    owner_id: String,
    trip: Trip,
}

/// File-based trip store for the local backend.
#[derive(Debug, Clone)]
pub struct LocalTripStore {
    base_path: PathBuf,
}

impl LocalTripStore {
    /// Creates a store rooted at the given data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            base_path: data_dir.as_ref().to_path_buf(),
        }
    }

    fn trips_dir(&self) -> PathBuf {
        self.base_path.join("trips")
    }

    fn trip_path(&self, id: &TripId) -> PathBuf {
        self.trips_dir().join(format!("{}.json", id))
    }
}

#[async_trait]
impl TripStore for LocalTripStore {
    async fn list_trips(&self, owner: &UserId) -> Result<Vec<Trip>, PersistenceError> {
        let dir = self.trips_dir();
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::Io(e.to_string())),
        };

        let mut trips = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PersistenceError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = fs::read_to_string(&path)
                .await
                .map_err(|e| PersistenceError::Io(e.to_string()))?;
            match serde_json::from_str::<StoredTrip>(&raw) {
                Ok(record) if record.owner_id == owner.as_str() => trips.push(record.trip),
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable trip record");
                }
            }
        }
        Ok(trips)
    }

    async fn upsert_trip(&self, trip: &Trip, owner: &UserId) -> Result<(), PersistenceError> {
        fs::create_dir_all(self.trips_dir())
            .await
            .map_err(|e| PersistenceError::Io(e.to_string()))?;

        let record = StoredTrip {
            owner_id: owner.as_str().to_string(),
            trip: trip.clone(),
        };
        let raw = serde_json::to_vec_pretty(&record)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        fs::write(self.trip_path(trip.id()), raw)
            .await
            .map_err(|e| PersistenceError::Io(e.to_string()))
    }

    async fn delete_trip(&self, id: &TripId) -> Result<(), PersistenceError> {
        match fs::remove_file(self.trip_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::{mutation, CurrencyConfig, TripDraft};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn owner(key: &str) -> UserId {
        UserId::new(key).unwrap()
    }

    fn sample_trip(destination: &str) -> Trip {
        mutation::apply_trip_fields(
            None,
            TripDraft {
                destination: destination.to_string(),
                cities: vec!["Lisboa".to_string()],
                start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
                budget_brl: 5000.0,
                currencies: vec![CurrencyConfig::new("EUR", 6.0)],
                cover_image: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_then_list_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = LocalTripStore::new(dir.path());
        let trip = sample_trip("Portugal");

        store.upsert_trip(&trip, &owner("u1")).await.unwrap();
        let listed = store.list_trips(&owner("u1")).await.unwrap();
        assert_eq!(listed, vec![trip]);
    }

    #[tokio::test]
    async fn list_scopes_by_owner() {
        let dir = TempDir::new().unwrap();
        let store = LocalTripStore::new(dir.path());
        store
            .upsert_trip(&sample_trip("Portugal"), &owner("u1"))
            .await
            .unwrap();
        store
            .upsert_trip(&sample_trip("Japão"), &owner("u2"))
            .await
            .unwrap();

        let listed = store.list_trips(&owner("u1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].destination(), "Portugal");
        assert!(store.list_trips(&owner("u3")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_wholesale() {
        let dir = TempDir::new().unwrap();
        let store = LocalTripStore::new(dir.path());
        let trip = sample_trip("Portugal");
        store.upsert_trip(&trip, &owner("u1")).await.unwrap();

        let renamed = mutation::update_notes(&trip, "novo plano");
        store.upsert_trip(&renamed, &owner("u1")).await.unwrap();

        let listed = store.list_trips(&owner("u1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].notes(), "novo plano");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = LocalTripStore::new(dir.path());
        let trip = sample_trip("Portugal");
        store.upsert_trip(&trip, &owner("u1")).await.unwrap();

        store.delete_trip(trip.id()).await.unwrap();
        assert!(store.list_trips(&owner("u1")).await.unwrap().is_empty());
        // Deleting again is not an error.
        store.delete_trip(trip.id()).await.unwrap();
        store.delete_trip(&TripId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn list_on_empty_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalTripStore::new(dir.path());
        assert!(store.list_trips(&owner("u1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_records_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = LocalTripStore::new(dir.path());
        store
            .upsert_trip(&sample_trip("Portugal"), &owner("u1"))
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("trips/bogus.json"), b"{not json")
            .await
            .unwrap();

        let listed = store.list_trips(&owner("u1")).await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
