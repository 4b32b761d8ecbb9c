//! Application layer - session and sync orchestration over the ports.

mod controller;

pub use controller::{ControllerError, SessionController};
