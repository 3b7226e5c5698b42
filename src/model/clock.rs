//! Serde encoding for meeting clock times
//!
//! Times are written as RFC 3339 timestamps on the reference date
//! `0000-01-01`, and an unset time is written as the zero timestamp. Older
//! batches put their times on `2006-01-02` instead. Reading keeps only the
//! clock time, so any date is accepted.

use chrono::{DateTime, Datelike, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

/// Timestamp written for a meeting time that could not be parsed
pub const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// Formats a clock time the way the catalog prints it (e.g. `10:00AM`)
pub fn format_clock(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!(
        "{}:{:02}{}",
        hour,
        time.minute(),
        if pm { "PM" } else { "AM" }
    )
}

pub(crate) fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(t) => serializer.serialize_str(&format!("0000-01-01T{}Z", t.format("%H:%M:%S"))),
        None => serializer.serialize_str(ZERO_TIMESTAMP),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if raw.is_empty() {
        return Ok(None);
    }

    let parsed = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))?;

    let date = parsed.date_naive();
    let time = parsed.time();
    let is_zero_date = date.year() == 1 && date.month() == 1 && date.day() == 1;
    if is_zero_date && time.num_seconds_from_midnight() == 0 {
        return Ok(None);
    }

    Ok(Some(time))
}
