//! Domain logic for the moon-leasing altitude monitor.
//!
//! Pure functions and types only: no database or network access. The
//! `db`, `telemetry` and `monitor` crates build on these.

pub mod altitude;
pub mod error;
pub mod health;
pub mod timestamp;
pub mod types;
