//! Fake satellite telemetry service.
//!
//! Serves a random-walk altitude feed in the same JSON shape the monitor
//! consumes, persisting the latest reading and a log of every generated
//! reading to a state directory.

pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod router;
pub mod state;
