//! Serde helpers for calendar dates on the wire.
//!
//! The API sends trade dates as `YYYY-MM-DD`, but some endpoints echo them
//! back as full timestamps. Both forms deserialize to the date part; dates
//! always serialize as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw)))
}

pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => super::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_flexible_date(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        assert_eq!(parse_flexible_date("2025-01-17"), Some(expected));
        assert_eq!(parse_flexible_date("2025-01-17T00:00:00Z"), Some(expected));
        assert_eq!(
            parse_flexible_date("2025-01-17T15:30:00.000+00:00"),
            Some(expected)
        );
        assert_eq!(parse_flexible_date("2025-01-17T09:15:00"), Some(expected));
        assert_eq!(parse_flexible_date("17/01/2025"), None);
    }
}
