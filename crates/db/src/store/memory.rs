//! In-process [`ReadingStore`] with the same semantics as the Postgres one.
//!
//! Used by tests and local demos that run without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use moonlease_core::types::{utc_now, DbId, Timestamp};
use tokio::sync::RwLock;

use crate::models::reading::{NewReading, Reading};
use crate::store::{lookback_start, window_start, ReadingStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<Timestamp, Reading>,
    next_id: DbId,
}

/// Readings held in a `BTreeMap` keyed by timestamp.
#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    inner: RwLock<Inner>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored reading.
    pub async fn clear(&self) {
        self.inner.write().await.rows.clear();
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn insert(&self, reading: NewReading) -> Result<Reading, StoreError> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.rows.get(&reading.timestamp) {
            tracing::info!(
                timestamp = %reading.timestamp,
                altitude = reading.altitude,
                "Attempted duplicate insert, ignoring"
            );
            return Ok(existing.clone());
        }

        inner.next_id += 1;
        let row = Reading {
            id: inner.next_id,
            timestamp: reading.timestamp,
            altitude: reading.altitude,
            recorded_at: utc_now(),
        };
        inner.rows.insert(row.timestamp, row.clone());
        Ok(row)
    }

    async fn all(&self) -> Result<Vec<Reading>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().rev().cloned().collect())
    }

    async fn latest(&self, window_minutes: i64) -> Result<Vec<Reading>, StoreError> {
        let Some(since) = window_start(window_minutes) else {
            return self.all().await;
        };
        let inner = self.inner.read().await;
        Ok(inner.rows.range(since..).rev().map(|(_, r)| r.clone()).collect())
    }

    async fn last_below(
        &self,
        threshold: f64,
        lookback_minutes: i64,
    ) -> Result<Option<Reading>, StoreError> {
        let since = lookback_start(lookback_minutes);
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .range(since..)
            .rev()
            .map(|(_, r)| r)
            .find(|r| r.altitude < threshold)
            .cloned())
    }

    async fn last_above(
        &self,
        threshold: f64,
        lookback_minutes: i64,
    ) -> Result<Option<Reading>, StoreError> {
        let since = lookback_start(lookback_minutes);
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .range(since..)
            .rev()
            .map(|(_, r)| r)
            .find(|r| r.altitude >= threshold)
            .cloned())
    }

    async fn last_one(&self) -> Result<Option<Reading>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().next_back().cloned())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.rows.len() as u64)
    }
}
