//! PostgreSQL implementation of the trip store.
//!
//! Trips are stored as whole JSONB documents keyed by trip id and
//! tagged with the owner key, matching the wholesale-replace upsert
//! contract: nested arrays are replaced, never merged row-by-row.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{TripId, UserId};
use crate::domain::trip::Trip;
use crate::ports::{PersistenceError, TripStore};

/// PostgreSQL trip store for the remote multi-user backend.
#[derive(Clone)]
pub struct PostgresTripStore {
    pool: PgPool,
}

impl PostgresTripStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripStore for PostgresTripStore {
    async fn list_trips(&self, owner: &UserId) -> Result<Vec<Trip>, PersistenceError> {
        let rows = sqlx::query("SELECT data FROM trips WHERE owner_id = $1 ORDER BY updated_at DESC")
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PersistenceError::Database(format!("failed to list trips: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let data: serde_json::Value = row
                    .try_get("data")
                    .map_err(|e| PersistenceError::Database(e.to_string()))?;
                serde_json::from_value(data)
                    .map_err(|e| PersistenceError::Serialization(e.to_string()))
            })
            .collect()
    }

    async fn upsert_trip(&self, trip: &Trip, owner: &UserId) -> Result<(), PersistenceError> {
        let data = serde_json::to_value(trip)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO trips (id, owner_id, data, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (id) DO UPDATE SET
                owner_id = EXCLUDED.owner_id,
                data = EXCLUDED.data,
                updated_at = now()
            "#,
        )
        .bind(trip.id().as_uuid())
        .bind(owner.as_str())
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| PersistenceError::Database(format!("failed to upsert trip: {}", e)))?;

        Ok(())
    }

    async fn delete_trip(&self, id: &TripId) -> Result<(), PersistenceError> {
        // Idempotent: zero rows affected is fine.
        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::Database(format!("failed to delete trip: {}", e)))?;

        Ok(())
    }
}

/// Runs the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), PersistenceError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| PersistenceError::Database(format!("migration failed: {}", e)))
}
