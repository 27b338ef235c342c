//! Timestamp representation for persisted notes.
//!
//! Notes are written with RFC 3339 UTC strings at millisecond precision
//! (`2024-05-01T12:30:00.000Z`). Readers also accept epoch milliseconds,
//! either as a JSON number or as a numeric string, so records produced by
//! other writers of the same key still load.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Visitor};
use std::fmt::Formatter;

/// Drops sub-millisecond precision, which storage cannot represent.
pub fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or(value)
}

/// Formats a timestamp the way it is persisted.
pub fn to_storage_string(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any accepted persisted timestamp form.
///
/// Returns `None` for text that is neither RFC 3339 nor an epoch-millisecond
/// integer, or for values outside chrono's representable range.
pub fn parse_storage_string(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(truncate_to_millis(parsed.with_timezone(&Utc)));
    }
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// `#[serde(with = ...)]` adapter for note timestamps.
pub mod serde_millis {
    use super::{to_storage_string, TimestampVisitor};
    use chrono::{DateTime, Utc};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_storage_string(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an RFC 3339 timestamp string or epoch milliseconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_storage_string(value)
            .ok_or_else(|| E::custom(format!("invalid timestamp `{value}`")))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        DateTime::from_timestamp_millis(value)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {value}")))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let millis = i64::try_from(value)
            .map_err(|_| E::custom(format!("timestamp out of range: {value}")))?;
        self.visit_i64(millis)
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(E::custom(format!("invalid timestamp `{value}`")));
        }
        self.visit_i64(value as i64)
    }
}
