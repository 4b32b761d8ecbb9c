//! Bootstrap binary: loads configuration, wires the selected backend
//! and restores any previous session.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use roteiro::adapters::auth::LocalAuthProvider;
use roteiro::adapters::postgres::{run_migrations, PostgresAuthProvider, PostgresTripStore};
use roteiro::adapters::storage::LocalTripStore;
use roteiro::application::SessionController;
use roteiro::config::{AppConfig, StorageBackend};
use roteiro::ports::Backend;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let backend = match config.storage.backend {
        StorageBackend::Local => {
            info!(data_dir = %config.storage.data_dir.display(), "using local backend");
            Backend::new(
                Arc::new(LocalAuthProvider::open(&config.storage.data_dir).await?),
                Arc::new(LocalTripStore::new(&config.storage.data_dir)),
            )
        }
        StorageBackend::Postgres => {
            info!("using postgres backend");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .min_connections(config.database.min_connections)
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(&config.database.url)
                .await?;
            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }
            Backend::new(
                Arc::new(PostgresAuthProvider::new(pool.clone())),
                Arc::new(PostgresTripStore::new(pool)),
            )
        }
    };

    let controller = SessionController::new(backend);
    match controller.restore_session().await? {
        Some(user) => {
            let trips = controller.trips().await;
            info!(user = %user.id, trips = trips.len(), "session restored");
        }
        None => info!("no active session"),
    }

    Ok(())
}
