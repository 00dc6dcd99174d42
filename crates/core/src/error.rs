#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid altitude: {0}")]
    InvalidAltitude(String),
}
