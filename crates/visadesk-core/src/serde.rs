use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an ISO-8601 date string into a UTC timestamp.
///
/// Accepts RFC 3339 date-times (`2030-05-01T09:30:00Z`, with any offset) and
/// plain calendar dates (`2030-05-01`, read as midnight UTC).
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn deserialize_iso8601<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso8601(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("'{}' is not a valid ISO-8601 date", raw))
    })
}
