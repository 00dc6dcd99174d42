/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are naive UTC (offset stripped after conversion).
pub type Timestamp = chrono::NaiveDateTime;

/// Current wall-clock time as a naive UTC timestamp.
pub fn utc_now() -> Timestamp {
    chrono::Utc::now().naive_utc()
}
