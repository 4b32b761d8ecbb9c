//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! The persistence boundary of the trip core is the pair
//! `AuthProvider` + `TripStore`; a [`Backend`] bundles one
//! implementation of each, selected once at startup and passed to the
//! session controller explicitly (no ambient global client).

mod auth_provider;
mod trip_store;

use std::sync::Arc;

pub use auth_provider::AuthProvider;
pub use trip_store::{PersistenceError, TripStore};

/// One concrete persistence backend: an auth provider and a trip store
/// that share the same underlying medium.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthProvider>,
    pub trips: Arc<dyn TripStore>,
}

impl Backend {
    /// Bundles an auth provider and a trip store.
    pub fn new(auth: Arc<dyn AuthProvider>, trips: Arc<dyn TripStore>) -> Self {
        Self { auth, trips }
    }
}
