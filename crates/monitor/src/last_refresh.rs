//! Time of the last successful refresh.
//!
//! Read and written from concurrent refresh and request paths. Stored as
//! microseconds since the epoch in an atomic so reads never tear; races
//! only cost an extra or skipped refresh.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::DateTime;
use moonlease_core::types::Timestamp;

const UNSET: i64 = i64::MIN;

#[derive(Debug)]
pub struct LastRefresh {
    micros: AtomicI64,
}

impl Default for LastRefresh {
    fn default() -> Self {
        Self::new()
    }
}

impl LastRefresh {
    /// An empty cell, as at process start.
    pub fn new() -> Self {
        Self {
            micros: AtomicI64::new(UNSET),
        }
    }

    pub fn get(&self) -> Option<Timestamp> {
        match self.micros.load(Ordering::Acquire) {
            UNSET => None,
            micros => DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc()),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.micros
            .store(at.and_utc().timestamp_micros(), Ordering::Release);
    }

    pub fn clear(&self) {
        self.micros.store(UNSET, Ordering::Release);
    }

    /// Unset, or strictly older than `max_age` as of `now`.
    ///
    /// A refresh time in the future (clock stepped back) counts as fresh.
    pub fn is_stale(&self, now: Timestamp, max_age: Duration) -> bool {
        match self.get() {
            None => true,
            Some(last) => (now - last).to_std().is_ok_and(|elapsed| elapsed > max_age),
        }
    }
}
