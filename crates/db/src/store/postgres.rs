//! [`ReadingStore`] backed by PostgreSQL through [`ReadingRepo`].

use async_trait::async_trait;

use crate::models::reading::{NewReading, Reading};
use crate::repositories::ReadingRepo;
use crate::store::{lookback_start, window_start, ReadingStore, StoreError};
use crate::{is_unique_violation, DbPool};

/// PostgreSQL reading store. Cheap to clone (wraps the pool).
#[derive(Clone)]
pub struct PgReadingStore {
    pool: DbPool,
}

impl PgReadingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn insert(&self, reading: NewReading) -> Result<Reading, StoreError> {
        match ReadingRepo::insert(&self.pool, &reading).await {
            Ok(row) => {
                tracing::debug!(
                    id = row.id,
                    timestamp = %row.timestamp,
                    altitude = row.altitude,
                    "Reading stored"
                );
                Ok(row)
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::info!(
                    timestamp = %reading.timestamp,
                    altitude = reading.altitude,
                    "Attempted duplicate insert, ignoring"
                );
                ReadingRepo::find_by_timestamp(&self.pool, reading.timestamp)
                    .await?
                    .ok_or_else(|| {
                        StoreError::Internal(format!(
                            "duplicate reading at {} vanished",
                            reading.timestamp
                        ))
                    })
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    timestamp = %reading.timestamp,
                    altitude = reading.altitude,
                    "Failed to insert reading"
                );
                Err(e.into())
            }
        }
    }

    async fn all(&self) -> Result<Vec<Reading>, StoreError> {
        Ok(ReadingRepo::list_all(&self.pool).await?)
    }

    async fn latest(&self, window_minutes: i64) -> Result<Vec<Reading>, StoreError> {
        match window_start(window_minutes) {
            Some(since) => Ok(ReadingRepo::list_since(&self.pool, since).await?),
            None => self.all().await,
        }
    }

    async fn last_below(
        &self,
        threshold: f64,
        lookback_minutes: i64,
    ) -> Result<Option<Reading>, StoreError> {
        let since = lookback_start(lookback_minutes);
        Ok(ReadingRepo::last_below_since(&self.pool, threshold, since).await?)
    }

    async fn last_above(
        &self,
        threshold: f64,
        lookback_minutes: i64,
    ) -> Result<Option<Reading>, StoreError> {
        let since = lookback_start(lookback_minutes);
        Ok(ReadingRepo::last_at_or_above_since(&self.pool, threshold, since).await?)
    }

    async fn last_one(&self) -> Result<Option<Reading>, StoreError> {
        Ok(ReadingRepo::latest(&self.pool).await?)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count = ReadingRepo::count(&self.pool).await?;
        u64::try_from(count).map_err(|_| StoreError::Internal(format!("negative count {count}")))
    }
}
