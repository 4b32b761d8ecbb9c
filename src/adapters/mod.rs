//! Adapters - implementations of the ports.
//!
//! Two interchangeable persistence backends plus an in-memory store:
//!
//! - `auth` / `storage`: local single-device backend (JSON files)
//! - `postgres`: remote multi-user backend (document rows scoped by owner)

pub mod auth;
pub mod postgres;
pub mod storage;
