//! Lenient deserializers for fields whose wire shape varies between API
//! versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Flag(bool),
    Number(i64),
}

/// Accepts an identifier given as either a string or an unsigned integer.
pub(super) fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match RawId::deserialize(deserializer)? {
        RawId::Text(text) => Ok(text),
        RawId::Number(number) => Ok(number.to_string()),
    }
}

/// Accepts a boolean given as `true`/`false`, `0`/`1`, or `null`.
pub(super) fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(RawFlag::Flag(flag)) => Ok(flag),
        Some(RawFlag::Number(number)) => Ok(number != 0),
    }
}

/// Accepts an RFC 3339 timestamp, an empty string, or `null`.
pub(super) fn optional_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(D::Error::custom)
}
