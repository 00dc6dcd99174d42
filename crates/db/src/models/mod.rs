//! Database row structs and DTOs.

pub mod reading;
