//! Roteiro - Personal Trip Planner Core
//!
//! This crate implements the core of a trip planning application:
//! itineraries organized as day-by-day activity lists, expense tracking
//! with currency conversion, and travel document checklists, behind a
//! pluggable persistence port with local-file and PostgreSQL backends.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
