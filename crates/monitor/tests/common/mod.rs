#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use moonlease_core::types::{utc_now, Timestamp};
use moonlease_db::models::reading::{NewReading, Reading};
use moonlease_db::store::{MemoryReadingStore, ReadingStore, StoreError};
use moonlease_monitor::{MonitorSettings, SatelliteMonitor};
use moonlease_telemetry::{TelemetryError, TelemetryReading, TelemetrySource};

// ---------------------------------------------------------------------------
// Scripted telemetry source
// ---------------------------------------------------------------------------

/// What the fake upstream answers with.
#[derive(Debug, Clone, Copy)]
pub enum Upstream {
    Reading(TelemetryReading),
    Empty,
    Down,
}

/// Telemetry source that replays a configurable answer and counts calls.
pub struct FakeSource {
    answer: Mutex<Upstream>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(answer: Upstream) -> Arc<Self> {
        Arc::new(Self {
            answer: Mutex::new(answer),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn answering(timestamp: Timestamp, altitude: f64) -> Arc<Self> {
        Self::new(Upstream::Reading(TelemetryReading {
            timestamp,
            altitude,
        }))
    }

    pub fn set(&self, answer: Upstream) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetrySource for FakeSource {
    async fn fetch_reading(&self) -> Result<Option<TelemetryReading>, TelemetryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match *self.answer.lock().unwrap() {
            Upstream::Reading(r) => Ok(Some(r)),
            Upstream::Empty => Ok(None),
            Upstream::Down => Err(TelemetryError::Status {
                status: 503,
                body: "unavailable".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Store that fails writes
// ---------------------------------------------------------------------------

/// Delegates reads to memory but rejects every insert.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryReadingStore,
}

#[async_trait]
impl ReadingStore for ReadOnlyStore {
    async fn insert(&self, _reading: NewReading) -> Result<Reading, StoreError> {
        Err(StoreError::Internal("disk full".into()))
    }
    async fn all(&self) -> Result<Vec<Reading>, StoreError> {
        self.inner.all().await
    }
    async fn latest(&self, window_minutes: i64) -> Result<Vec<Reading>, StoreError> {
        self.inner.latest(window_minutes).await
    }
    async fn last_below(&self, t: f64, m: i64) -> Result<Option<Reading>, StoreError> {
        self.inner.last_below(t, m).await
    }
    async fn last_above(&self, t: f64, m: i64) -> Result<Option<Reading>, StoreError> {
        self.inner.last_above(t, m).await
    }
    async fn last_one(&self) -> Result<Option<Reading>, StoreError> {
        self.inner.last_one().await
    }
    async fn count(&self) -> Result<u64, StoreError> {
        self.inner.count().await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A timestamp far outside every window, as the upstream fixture returns.
pub fn long_ago() -> Timestamp {
    NaiveDate::from_ymd_opt(2022, 7, 27)
        .unwrap()
        .and_hms_micro_opt(4, 49, 37, 681_136)
        .unwrap()
}

pub fn seconds_ago(now: Timestamp, seconds: f64) -> Timestamp {
    now - Duration::microseconds((seconds * 1_000_000.0) as i64)
}

pub fn monitor(
    store: Arc<MemoryReadingStore>,
    source: Arc<FakeSource>,
) -> SatelliteMonitor {
    SatelliteMonitor::new(store, source, MonitorSettings::default())
}

/// Insert readings at the given ages (seconds) with the given altitudes.
pub async fn seed(store: &MemoryReadingStore, secs: &[f64], alts: &[f64]) {
    let now = utc_now();
    for (s, a) in secs.iter().zip(alts) {
        store
            .insert(NewReading::new(seconds_ago(now, *s), *a))
            .await
            .unwrap();
    }
}
