//! Trip store adapters for the local backend and for tests.

mod in_memory_trip_store;
mod local_trip_store;

pub use in_memory_trip_store::InMemoryTripStore;
pub use local_trip_store::LocalTripStore;
