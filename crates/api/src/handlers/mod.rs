//! Request handlers.
//!
//! Handlers delegate to the shared [`SatelliteMonitor`](moonlease_monitor::SatelliteMonitor)
//! and wrap results in the `{ "data": ... }` envelope.

pub mod docs;
pub mod satellite;
