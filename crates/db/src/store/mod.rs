//! The reading store seam used by the monitor.
//!
//! Duplicate inserts (same timestamp) are an expected outcome of polling
//! the same upstream value twice, so they are not errors: the store logs
//! them at info level and hands back the row already stored. Every other
//! failure is logged at error level and returned as a [`StoreError`].
//!
//! Readings are kept forever. There is no retention policy.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use moonlease_core::types::{utc_now, Timestamp};

use crate::models::reading::{NewReading, Reading};

pub mod memory;
pub mod postgres;

pub use memory::MemoryReadingStore;
pub use postgres::PgReadingStore;

/// Errors from a [`ReadingStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store reached a state it cannot explain.
    #[error("Storage failure: {0}")]
    Internal(String),
}

/// Durable, append-only storage of altitude readings keyed by timestamp.
///
/// All list results are ordered newest first. Implementations must be safe
/// to call concurrently.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Insert a reading, or return the existing row for its timestamp.
    async fn insert(&self, reading: NewReading) -> Result<Reading, StoreError>;

    /// Every stored reading.
    async fn all(&self) -> Result<Vec<Reading>, StoreError>;

    /// Readings from the last `window_minutes`. Zero or negative means all.
    async fn latest(&self, window_minutes: i64) -> Result<Vec<Reading>, StoreError>;

    /// Newest reading in the lookback with altitude strictly below `threshold`.
    async fn last_below(
        &self,
        threshold: f64,
        lookback_minutes: i64,
    ) -> Result<Option<Reading>, StoreError>;

    /// Newest reading in the lookback with altitude at or above `threshold`.
    async fn last_above(
        &self,
        threshold: f64,
        lookback_minutes: i64,
    ) -> Result<Option<Reading>, StoreError>;

    /// Newest reading overall.
    async fn last_one(&self) -> Result<Option<Reading>, StoreError>;

    /// Number of stored readings.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Start of a trailing window, or `None` when the window is unbounded.
///
/// Windows reaching past the representable range are unbounded too.
pub fn window_start(window_minutes: i64) -> Option<Timestamp> {
    if window_minutes <= 0 {
        return None;
    }
    minutes_before_now(window_minutes)
}

/// Start of a lookback. Lookbacks are never shorter than one minute, and
/// saturate at the earliest representable timestamp.
pub fn lookback_start(lookback_minutes: i64) -> Timestamp {
    minutes_before_now(lookback_minutes.max(1)).unwrap_or(NaiveDateTime::MIN)
}

fn minutes_before_now(minutes: i64) -> Option<Timestamp> {
    Duration::try_minutes(minutes).and_then(|span| utc_now().checked_sub_signed(span))
}
