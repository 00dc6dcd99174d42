//! Satellite altitude reading entity and create DTO.

use moonlease_core::timestamp::TimestampInput;
use moonlease_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A stored altitude reading. Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Reading {
    pub id: DbId,
    /// Upstream `last_updated`, naive UTC. Unique.
    pub timestamp: Timestamp,
    pub altitude: f64,
    /// When the row was written. Informational only.
    pub recorded_at: Timestamp,
}

/// DTO for inserting a new reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewReading {
    pub timestamp: Timestamp,
    pub altitude: f64,
}

impl NewReading {
    /// Build a reading, normalizing the timestamp to naive UTC.
    pub fn new(timestamp: impl Into<TimestampInput>, altitude: f64) -> Self {
        Self {
            timestamp: timestamp.into().into_naive_utc(),
            altitude,
        }
    }
}
