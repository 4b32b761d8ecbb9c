//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `ROTEIRO_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use roteiro::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage backend selection (local files or PostgreSQL)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Database configuration, only used by the postgres backend
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the `ROTEIRO`
    /// prefix, `__` separating nested values:
    ///
    /// - `ROTEIRO__STORAGE__BACKEND=postgres` -> `storage.backend`
    /// - `ROTEIRO__DATABASE__URL=...` -> `database.url`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("ROTEIRO").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The database section is only validated when the postgres backend
    /// is selected; the local backend does not need it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("ROTEIRO__STORAGE__BACKEND");
        env::remove_var("ROTEIRO__STORAGE__DATA_DIR");
        env::remove_var("ROTEIRO__DATABASE__URL");
    }

    #[test]
    fn loads_with_no_variables_set() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ROTEIRO__STORAGE__BACKEND", "postgres");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert!(config.validate().is_err());
    }

    #[test]
    fn reads_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ROTEIRO__STORAGE__BACKEND", "postgres");
        env::set_var("ROTEIRO__DATABASE__URL", "postgresql://test@localhost/roteiro");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/roteiro");
        assert!(config.validate().is_ok());
    }
}
