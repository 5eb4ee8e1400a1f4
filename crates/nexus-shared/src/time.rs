//! Canonical timestamp encoding.
//!
//! Every timestamp that crosses the storage boundary is written as an
//! RFC 3339 string in UTC with millisecond precision
//! (`2024-01-15T00:00:00.000Z`), which is also what a browser produces for
//! `Date` values. Parsing is lenient: it additionally accepts zone-less
//! date-times and bare dates, both read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc};

use crate::error::TimestampError;

/// Current time, the single clock used by all stores.
///
/// Truncated to milliseconds so a value survives a storage round trip
/// unchanged.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Build a UTC timestamp from calendar fields.
///
/// Out-of-range fields collapse to the Unix epoch; only used for fixed seed
/// data.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Format a timestamp in the canonical encoding.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp written by [`format`] or by an older client.
pub fn parse(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
                return Ok(Utc.from_utc_datetime(&naive));
            }
            if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Utc.from_utc_datetime(&naive));
                }
            }
            Err(TimestampError::Invalid {
                value: value.to_string(),
                source: rfc_err,
            })
        }
    }
}

/// `#[serde(with = "nexus_shared::time::rfc3339")]` for `DateTime<Utc>` fields.
pub mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse(&raw).map_err(de::Error::custom)
    }

    /// Same encoding for `Option<DateTime<Utc>>`; pair with `#[serde(default)]`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => s.serialize_some(&super::super::format(ts)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(d)?;
            raw.map(|v| super::super::parse(&v).map_err(de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_millisecond_utc() {
        let ts = at(2024, 1, 15, 0, 0);
        assert_eq!(format(&ts), "2024-01-15T00:00:00.000Z");
    }

    #[test]
    fn test_now_survives_format_and_parse() {
        let ts = now();
        assert_eq!(parse(&format(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_parse_accepts_browser_encoding() {
        let ts = parse("2024-02-10T14:00:00.000Z").unwrap();
        assert_eq!(ts, at(2024, 2, 10, 14, 0));
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let ts = parse("2024-02-10T16:00:00+02:00").unwrap();
        assert_eq!(ts, at(2024, 2, 10, 14, 0));
    }

    #[test]
    fn test_parse_accepts_zoneless_and_bare_dates() {
        assert_eq!(parse("2024-03-01T09:00:00").unwrap(), at(2024, 3, 1, 9, 0));
        assert_eq!(parse("2024-01-20").unwrap(), at(2024, 1, 20, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse("   "), Err(TimestampError::Empty)));
        assert!(matches!(parse("yesterday"), Err(TimestampError::Invalid { .. })));
    }

    #[test]
    fn test_invalid_calendar_fields_fall_back_to_epoch() {
        assert_eq!(at(2024, 13, 40, 0, 0).timestamp(), 0);
    }
}
