//! Domain layer: pure model with no IO dependencies.

pub mod foundation;
pub mod trip;
