//! Timestamp conversion for seismic processing payloads.
//!
//! The wire format carries times as ISO-8601 strings
//! (`2020-01-01T12:00:00.000000Z`) while entities and downstream consumers
//! work in floating-point epoch seconds. This module converts between the
//! two, strictly in UTC, and hosts the small string validators shared by
//! the entity validation rules.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};

/// Error returned when a timestamp cannot be parsed or rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Nanoseconds per second.
const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Fractional digits consumed while parsing. Later digits must still be
/// digits but contribute nothing.
const MAX_FRACTION_DIGITS: usize = 9;

/// Output layout: UTC with exactly six fractional digits.
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Parse a `YYYY-MM-DDTHH:MM:SS[.f…]Z` timestamp into epoch seconds.
///
/// The fractional part is optional and may carry any number of digits;
/// digits beyond nanosecond precision are checked but ignored. Only UTC
/// (literal `Z` suffix) is accepted. Times before 1970 parse to negative
/// epoch seconds.
///
/// # Examples
///
/// ```
/// use quake_formats::time;
///
/// let epoch = time::parse_iso8601("2020-01-01T00:00:00Z").unwrap();
/// assert_eq!(epoch, 1577836800.0);
///
/// let epoch = time::parse_iso8601("1970-01-01T00:00:00.5Z").unwrap();
/// assert_eq!(epoch, 0.5);
///
/// // Calendar fields are range-checked.
/// assert!(time::parse_iso8601("2020-13-01T00:00:00Z").is_err());
/// assert!(time::parse_iso8601("2020-01-01 00:00:00").is_err());
/// ```
pub fn parse_iso8601(s: &str) -> Result<f64, TimeError> {
    let bytes = s.as_bytes();

    // Shortest accepted form is YYYY-MM-DDTHH:MM:SSZ.
    if bytes.len() < 20 {
        return Err(TimeError::new("expected YYYY-MM-DDTHH:MM:SS[.f]Z"));
    }

    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(TimeError::new("expected '-' between date fields"));
    }
    if bytes[10] != b'T' {
        return Err(TimeError::new("expected 'T' between date and time"));
    }
    if bytes[13] != b':' || bytes[16] != b':' {
        return Err(TimeError::new("expected ':' between time fields"));
    }

    let year =
        parse_digits(&bytes[0..4]).ok_or_else(|| TimeError::new("invalid year digits"))?;
    let month =
        parse_digits(&bytes[5..7]).ok_or_else(|| TimeError::new("invalid month digits"))?;
    if !(1..=12).contains(&month) {
        return Err(TimeError::new("month must be 1-12"));
    }
    let day = parse_digits(&bytes[8..10]).ok_or_else(|| TimeError::new("invalid day digits"))?;
    let hour =
        parse_digits(&bytes[11..13]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }
    let minute =
        parse_digits(&bytes[14..16]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }
    let second =
        parse_digits(&bytes[17..19]).ok_or_else(|| TimeError::new("invalid second digits"))?;
    if second > 59 {
        return Err(TimeError::new("second must be 0-59"));
    }

    let fraction = match bytes[19] {
        b'Z' if bytes.len() == 20 => 0.0,
        b'Z' => return Err(TimeError::new("trailing characters after 'Z'")),
        b'.' => parse_fraction(&bytes[20..])?,
        _ => return Err(TimeError::new("expected '.' or 'Z' after seconds")),
    };

    // chrono validates day-for-month, including leap years.
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| TimeError::new("day out of range for month"))?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| TimeError::new("invalid time of day"))?;

    Ok(date.and_time(time).and_utc().timestamp() as f64 + fraction)
}

/// Render epoch seconds as a UTC ISO-8601 string.
///
/// Output always carries exactly six fractional digits (microseconds) and
/// the literal `Z` suffix; sub-microsecond input truncates. Fails on
/// non-finite input and on epochs whose UTC year falls outside 0000-9999,
/// so every rendered string parses back with [`parse_iso8601`].
///
/// # Examples
///
/// ```
/// use quake_formats::time;
///
/// assert_eq!(time::format_epoch(0.0).unwrap(), "1970-01-01T00:00:00.000000Z");
/// assert_eq!(
///     time::format_epoch(1577836800.5).unwrap(),
///     "2020-01-01T00:00:00.500000Z"
/// );
/// assert!(time::format_epoch(f64::NAN).is_err());
/// ```
pub fn format_epoch(seconds: f64) -> Result<String, TimeError> {
    if !seconds.is_finite() {
        return Err(TimeError::new("epoch seconds must be finite"));
    }

    // Split into whole seconds and a non-negative fraction so that times
    // before the epoch render correctly.
    let whole = seconds.floor();
    let mut secs = whole as i64;
    let mut nanos = ((seconds - whole) * f64::from(NANOS_PER_SEC)).round() as u32;
    if nanos >= NANOS_PER_SEC {
        secs = secs
            .checked_add(1)
            .ok_or_else(|| TimeError::new("epoch seconds out of range"))?;
        nanos = 0;
    }

    let timestamp = DateTime::from_timestamp(secs, nanos)
        .ok_or_else(|| TimeError::new("epoch seconds out of range"))?;
    // The grammar holds exactly four year digits; chrono renders wider
    // years with a sign prefix the parser rejects.
    if !(0..=9999).contains(&timestamp.year()) {
        return Err(TimeError::new("year must be 0000-9999"));
    }
    Ok(timestamp.format(OUTPUT_FORMAT).to_string())
}

/// True when `s` matches the timestamp grammar accepted by
/// [`parse_iso8601`].
pub fn is_iso8601(s: &str) -> bool {
    parse_iso8601(s).is_ok()
}

/// True when every character of `s` is an ASCII letter.
///
/// Vacuously true for the empty string; validators that care about
/// emptiness check it separately.
pub fn is_alpha(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parse a fixed-width run of ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    let mut value = 0u32;
    for &byte in bytes {
        value = value * 10 + (byte as char).to_digit(10)?;
    }
    Some(value)
}

/// Parse the fractional-seconds suffix: one or more digits ending in 'Z'.
fn parse_fraction(bytes: &[u8]) -> Result<f64, TimeError> {
    let (last, digits) = match bytes.split_last() {
        Some((last, digits)) => (*last, digits),
        None => return Err(TimeError::new("expected digits after '.'")),
    };
    if last != b'Z' {
        return Err(TimeError::new("expected 'Z' suffix"));
    }
    if digits.is_empty() {
        return Err(TimeError::new("expected digits after '.'"));
    }

    let mut numerator: u64 = 0;
    let mut denominator: f64 = 1.0;
    for (position, &byte) in digits.iter().enumerate() {
        let digit = (byte as char)
            .to_digit(10)
            .ok_or_else(|| TimeError::new("fraction must be digits"))?;
        if position < MAX_FRACTION_DIGITS {
            numerator = numerator * 10 + u64::from(digit);
            denominator *= 10.0;
        }
    }
    Ok(numerator as f64 / denominator)
}
