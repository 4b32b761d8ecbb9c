//! PostgreSQL adapters for the remote multi-user backend.

mod auth;
mod trip_store;

pub use auth::PostgresAuthProvider;
pub use trip_store::{run_migrations, PostgresTripStore};
