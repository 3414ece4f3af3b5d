//! Timestamp conversion between stored documents, client input, and API output.
//!
//! Documents persist instants as integer epoch milliseconds so that ordered
//! queries compare numerically on every backend. Readers are lenient and also
//! accept RFC 3339 strings and `{seconds, nanos}` objects (including the
//! underscore-prefixed export shape) written by other tools.
//!
//! The module doubles as a serde `with` adapter:
//!
//! ```ignore
//! #[serde(with = "barid_core::types::timestamp")]
//! pub created_at: DateTime<Utc>,
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Serialize an instant as epoch milliseconds.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(value.timestamp_millis())
}

/// Deserialize an instant from any stored representation.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    from_stored(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
}

/// `Option<DateTime<Utc>>` variant of the serde adapter.
///
/// A missing field, `null`, or an unreadable value all decode to `None`.
pub mod option {
    use super::*;

    /// Serialize an optional instant as epoch milliseconds or `null`.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional instant leniently.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(from_stored))
    }
}

/// Convert an instant to its stored JSON form.
pub fn to_stored(value: DateTime<Utc>) -> Value {
    Value::from(value.timestamp_millis())
}

/// Read an instant from a stored JSON value.
pub fn from_stored(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::String(s) => parse_flexible(s),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanos")
                .or_else(|| map.get("nanoseconds"))
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos as u32)
        }
        _ => None,
    }
}

/// Parse a client-supplied date or date-time.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM[:SS]` (as produced by
/// browser `datetime-local` inputs, taken as UTC), or a bare `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_flexible(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render an instant as RFC 3339 with millisecond precision and a `Z` suffix.
pub fn to_iso(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render only the calendar date (`YYYY-MM-DD`).
pub fn to_date_string(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}
