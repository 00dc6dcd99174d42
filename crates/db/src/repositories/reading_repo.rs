//! Repository for the `satellite_readings` table (append-only time-series).

use moonlease_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::reading::{NewReading, Reading};

/// Column list for `satellite_readings` SELECT queries.
const COLUMNS: &str = "id, \"timestamp\", altitude, recorded_at";

/// Provides query operations for altitude readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Insert a single reading.
    ///
    /// A reading whose timestamp already exists fails with a unique
    /// violation (`uq_satellite_readings_timestamp`); see
    /// [`crate::is_unique_violation`].
    pub async fn insert(pool: &PgPool, reading: &NewReading) -> Result<Reading, sqlx::Error> {
        let query = format!(
            "INSERT INTO satellite_readings (\"timestamp\", altitude) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(reading.timestamp)
            .bind(reading.altitude)
            .fetch_one(pool)
            .await
    }

    /// Find the reading with exactly this timestamp.
    pub async fn find_by_timestamp(
        pool: &PgPool,
        timestamp: Timestamp,
    ) -> Result<Option<Reading>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM satellite_readings WHERE \"timestamp\" = $1");
        sqlx::query_as::<_, Reading>(&query)
            .bind(timestamp)
            .fetch_optional(pool)
            .await
    }

    /// All readings, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM satellite_readings ORDER BY \"timestamp\" DESC"
        );
        sqlx::query_as::<_, Reading>(&query).fetch_all(pool).await
    }

    /// Readings at or after `since`, newest first.
    pub async fn list_since(pool: &PgPool, since: Timestamp) -> Result<Vec<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM satellite_readings \
             WHERE \"timestamp\" >= $1 \
             ORDER BY \"timestamp\" DESC"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// Most recent reading at or after `since` with altitude strictly below `threshold`.
    pub async fn last_below_since(
        pool: &PgPool,
        threshold: f64,
        since: Timestamp,
    ) -> Result<Option<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM satellite_readings \
             WHERE \"timestamp\" >= $1 AND altitude < $2 \
             ORDER BY \"timestamp\" DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(since)
            .bind(threshold)
            .fetch_optional(pool)
            .await
    }

    /// Most recent reading at or after `since` with altitude at or above `threshold`.
    pub async fn last_at_or_above_since(
        pool: &PgPool,
        threshold: f64,
        since: Timestamp,
    ) -> Result<Option<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM satellite_readings \
             WHERE \"timestamp\" >= $1 AND altitude >= $2 \
             ORDER BY \"timestamp\" DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(since)
            .bind(threshold)
            .fetch_optional(pool)
            .await
    }

    /// The newest reading overall.
    pub async fn latest(pool: &PgPool) -> Result<Option<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM satellite_readings ORDER BY \"timestamp\" DESC LIMIT 1"
        );
        sqlx::query_as::<_, Reading>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Total number of stored readings.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM satellite_readings")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
