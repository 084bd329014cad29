//! Tolerant timestamp decoding
//!
//! The service emits `created_at` in whatever form its database driver hands
//! back: zone-qualified RFC 3339 in some environments, naive ISO 8601 in
//! others. [`ApiTime`] accepts all of them.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Naive layouts tried after RFC 3339, interpreted as UTC
const NAIVE_FORMATS: [&str; 2] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Timestamp field of an API response
///
/// The zero value (empty string, `null` or a missing field) holds no instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiTime(Option<DateTime<Utc>>);

impl ApiTime {
    /// The zero timestamp
    pub const ZERO: ApiTime = ApiTime(None);

    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Some(instant))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// The parsed instant, `None` for the zero timestamp
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Parse a raw timestamp string using the tolerant format chain
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return Some(Self::ZERO);
        }
        parse_instant(raw).map(Self::new)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl From<DateTime<Utc>> for ApiTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl fmt::Display for ApiTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for ApiTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        match &raw {
            Value::Null => return Ok(Self::ZERO),
            Value::String(s) => {
                if let Some(t) = Self::parse(s) {
                    return Ok(t);
                }
            }
            _ => {}
        }

        // Last resort: whatever chrono's own deserializer accepts
        DateTime::<Utc>::deserialize(raw)
            .map(Self::new)
            .map_err(D::Error::custom)
    }
}

impl Serialize for ApiTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
