//! Text encoding for signed durations
//!
//! Durations are written as `<seconds>[.<fraction>]s`, for example `86400s`,
//! `-3600s` or `1.5s`. The fraction carries at most nine digits.

use chrono::Duration;
use thiserror::Error;

const MAX_FRACTION_DIGITS: usize = 9;

/// Errors from parsing a duration string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("duration must end with 's': {0:?}")]
    MissingUnit(String),

    #[error("invalid duration: {0:?}")]
    Invalid(String),

    #[error("duration out of range: {0:?}")]
    OutOfRange(String),
}

/// Format a duration as `<seconds>[.<fraction>]s`
pub fn format_duration(d: &Duration) -> String {
    let secs = d.num_seconds();
    let nanos = d.subsec_nanos();
    let sign = if secs < 0 || nanos < 0 { "-" } else { "" };
    let abs_secs = secs.unsigned_abs();
    let abs_nanos = nanos.unsigned_abs();

    if abs_nanos == 0 {
        format!("{}{}s", sign, abs_secs)
    } else {
        let fraction = format!("{:09}", abs_nanos);
        format!("{}{}.{}s", sign, abs_secs, fraction.trim_end_matches('0'))
    }
}

/// Parse a duration written by [`format_duration`]
pub fn parse_duration(s: &str) -> Result<Duration, ParseDurationError> {
    let body = s
        .strip_suffix('s')
        .ok_or_else(|| ParseDurationError::MissingUnit(s.to_string()))?;

    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let (secs_part, frac_part) = match body.split_once('.') {
        Some((secs_part, frac_part)) => (secs_part, frac_part),
        None => (body, ""),
    };

    let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if secs_part.is_empty()
        || !digits_only(secs_part)
        || !digits_only(frac_part)
        || (body.contains('.') && frac_part.is_empty())
        || frac_part.len() > MAX_FRACTION_DIGITS
    {
        return Err(ParseDurationError::Invalid(s.to_string()));
    }

    let secs: i64 = secs_part
        .parse()
        .map_err(|_| ParseDurationError::OutOfRange(s.to_string()))?;
    let nanos: i64 = if frac_part.is_empty() {
        0
    } else {
        format!("{:0<width$}", frac_part, width = MAX_FRACTION_DIGITS)
            .parse()
            .map_err(|_| ParseDurationError::Invalid(s.to_string()))?
    };

    let magnitude = Duration::try_seconds(secs)
        .and_then(|d| d.checked_add(&Duration::nanoseconds(nanos)))
        .ok_or_else(|| ParseDurationError::OutOfRange(s.to_string()))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Serde adapter for `#[serde(with = "crate::duration::serde_duration")]`
pub mod serde_duration {
    use super::{format_duration, parse_duration};
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
