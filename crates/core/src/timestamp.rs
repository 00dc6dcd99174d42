//! Timestamp parsing and naive-UTC normalization.
//!
//! Upstream telemetry reports `last_updated` in loosely ISO-8601 shaped
//! strings. Offset-aware values (`Z`, `+01:00`, `-0300`) are converted to
//! UTC and the offset is dropped. Values without an offset are taken to be
//! UTC already and pass through untouched, even if they were really local
//! time upstream.
//!
//! Besides the extended form, the basic form (`20220727T044937.681136Z`), a
//! comma before the fraction, hour-only offsets (`+01`) and a trailing
//! `UTC` / `GMT` zone name are accepted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Formats tried (in order) for strings that carry an explicit offset.
const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y%m%dT%H%M%S%.f%:z",
    "%Y%m%dT%H%M%S%.f%z",
];

/// Formats tried (in order) for strings without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
];

/// Format used when rendering timestamps back into upstream-style strings.
pub const ISO_MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A parsed timestamp that still remembers whether it had an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampInput {
    /// No offset information; treated as UTC.
    Naive(NaiveDateTime),
    /// Carries an explicit offset; converted to UTC on normalization.
    Aware(DateTime<FixedOffset>),
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimestampInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Aware(value.fixed_offset())
    }
}

impl TimestampInput {
    /// Collapse into a naive UTC timestamp.
    pub fn into_naive_utc(self) -> Timestamp {
        match self {
            Self::Naive(naive) => naive,
            Self::Aware(aware) => aware.naive_utc(),
        }
    }
}

/// Convert any supported timestamp value into naive UTC.
pub fn to_naive_utc(value: impl Into<TimestampInput>) -> Timestamp {
    value.into().into_naive_utc()
}

/// Parse a date-time string, keeping track of whether it had an offset.
pub fn parse_timestamp(raw: &str) -> Result<TimestampInput, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidTimestamp("empty timestamp".into()));
    }
    let canonical = canonicalize(trimmed);
    let trimmed = canonical.as_str();

    if let Ok(aware) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(TimestampInput::Aware(aware));
    }

    // A trailing `Z` means UTC regardless of the separator used.
    if let Some(body) = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
    {
        if let Some(naive) = parse_naive(body) {
            return Ok(TimestampInput::Aware(
                Utc.from_utc_datetime(&naive).fixed_offset(),
            ));
        }
    }

    for format in AWARE_FORMATS {
        if let Ok(aware) = DateTime::parse_from_str(trimmed, format) {
            return Ok(TimestampInput::Aware(aware));
        }
    }

    parse_naive(trimmed)
        .map(TimestampInput::Naive)
        .ok_or_else(|| CoreError::InvalidTimestamp(format!("unrecognised format: {trimmed}")))
}

/// Parse a date-time string straight to naive UTC.
pub fn normalize_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    parse_timestamp(raw).map(TimestampInput::into_naive_utc)
}

/// Render a naive UTC timestamp as `YYYY-MM-DDTHH:MM:SS.ffffffZ`.
pub fn format_utc(timestamp: &Timestamp) -> String {
    format!("{}Z", timestamp.format(ISO_MICROS_FORMAT))
}

/// Rewrite the accepted variants into forms the format tables understand.
fn canonicalize(trimmed: &str) -> String {
    let mut s = trimmed.replace(',', ".");
    if let Some(head) = strip_zone_name(&s) {
        s = format!("{}Z", head.trim_end());
    }
    expand_hour_offset(&mut s);
    s
}

fn strip_zone_name(s: &str) -> Option<&str> {
    let split = s.len().checked_sub(3)?;
    let (head, zone) = (s.get(..split)?, s.get(split..)?);
    let named_utc = zone.eq_ignore_ascii_case("UTC") || zone.eq_ignore_ascii_case("GMT");
    (named_utc && !head.is_empty()).then_some(head)
}

/// `+01` becomes `+01:00`. The sign must follow the time part and a digit,
/// so the dashes of a bare date are left alone.
fn expand_hour_offset(s: &mut String) {
    let Some(time_at) = s.find(['T', ' ']) else {
        return;
    };
    let bytes = s.as_bytes();
    let n = bytes.len();
    if n < 4 || n - 3 <= time_at {
        return;
    }
    let hour_offset = matches!(bytes[n - 3], b'+' | b'-')
        && bytes[n - 4].is_ascii_digit()
        && bytes[n - 2].is_ascii_digit()
        && bytes[n - 1].is_ascii_digit();
    if hour_offset {
        s.push_str(":00");
    }
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> Timestamp {
        NaiveDate::from_ymd_opt(2022, 7, 27)
            .unwrap()
            .and_hms_micro_opt(4, 49, 37, 681_136)
            .unwrap()
    }

    #[test]
    fn offset_representations_normalize_to_same_instant() {
        let inputs = [
            "2022-07-27T04:49:37.681136Z",
            "2022-07-27T04:49:37.681136+00:00",
            "2022-07-27T05:49:37.681136+01:00",
            "2022-07-27T06:49:37.681136+02:00",
            "2022-07-27T01:49:37.681136-03:00",
            "2022-07-27 01:49:37.681136-0300",
            "2022-07-27 04:49:37.681136Z",
            "20220727T044937.681136Z",
            "20220727T054937.681136+0100",
            "20220727T014937.681136-03:00",
            "2022-07-27T04:49:37,681136Z",
            "2022-07-27T05:49:37.681136+01",
            "2022-07-27 01:49:37.681136-03",
            "2022-07-27T04:49:37.681136 UTC",
            "2022-07-27 04:49:37.681136 gmt",
        ];

        for raw in inputs {
            let normalized = normalize_timestamp(raw).unwrap();
            assert_eq!(normalized, expected(), "input {raw}");
            assert_eq!(
                normalized.format(ISO_MICROS_FORMAT).to_string(),
                "2022-07-27T04:49:37.681136"
            );
        }
    }

    #[test]
    fn naive_string_passes_through_unchanged() {
        let parsed = parse_timestamp("2022-07-27T04:49:37.681136").unwrap();
        assert_eq!(parsed, TimestampInput::Naive(expected()));
        assert_eq!(parsed.into_naive_utc(), expected());
    }

    #[test]
    fn naive_value_is_not_shifted() {
        assert_eq!(to_naive_utc(expected()), expected());
    }

    #[test]
    fn aware_values_are_converted() {
        let utc = Utc.from_utc_datetime(&expected());
        assert_eq!(to_naive_utc(utc), expected());

        let plus_two = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .from_utc_datetime(&expected());
        assert_eq!(to_naive_utc(plus_two), expected());
    }

    #[test]
    fn whole_seconds_and_date_only_are_accepted() {
        let ts = normalize_timestamp("2017-04-07T02:53:10.000Z").unwrap();
        assert_eq!(ts.to_string(), "2017-04-07 02:53:10");

        let ts = normalize_timestamp("2017-04-07T02:53:10").unwrap();
        assert_eq!(ts.to_string(), "2017-04-07 02:53:10");

        let ts = normalize_timestamp("2017-04-07").unwrap();
        assert_eq!(ts.to_string(), "2017-04-07 00:00:00");
    }

    #[test]
    fn basic_form_without_offset_is_naive() {
        let parsed = parse_timestamp("20220727T044937.681136").unwrap();
        assert_eq!(parsed, TimestampInput::Naive(expected()));

        let ts = normalize_timestamp("20170407T025310").unwrap();
        assert_eq!(ts.to_string(), "2017-04-07 02:53:10");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            normalize_timestamp("yesterday-ish"),
            Err(CoreError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            normalize_timestamp("   "),
            Err(CoreError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            normalize_timestamp("UTC"),
            Err(CoreError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn format_utc_appends_z() {
        assert_eq!(format_utc(&expected()), "2022-07-27T04:49:37.681136Z");
        assert_eq!(
            normalize_timestamp(&format_utc(&expected())).unwrap(),
            expected()
        );
    }
}
