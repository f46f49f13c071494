// LogScan - core/timestamp.rs
//
// Extraction of the leading `DATE TIME` fields of a log line.
//
// Accepted shapes (first two whitespace-separated tokens):
//   YYYY-MM-DD HH:MM:SS[.fff...]
//   MM-DD      HH:MM:SS[.fff...]   (year defaults to the current local year)
//
// The fractional second is right-padded to microseconds: ".5" -> 500000,
// ".123" -> 123000. More than six fractional digits is rejected.

use crate::util::constants::FRACTION_DIGITS;
use crate::util::error::MalformedTimestamp;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Years representable in the log format (four-digit calendar years).
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Extract the timestamp at the start of `line`.
///
/// Year-less dates take the current local calendar year.
pub fn extract_timestamp(line: &str) -> Result<NaiveDateTime, MalformedTimestamp> {
    extract_timestamp_with_year(line, Local::now().year())
}

/// Extract the timestamp at the start of `line`, using `default_year` for
/// dates written as `MM-DD`.
pub fn extract_timestamp_with_year(
    line: &str,
    default_year: i32,
) -> Result<NaiveDateTime, MalformedTimestamp> {
    let mut tokens = line.split_whitespace();
    let (date, time) = match (tokens.next(), tokens.next()) {
        (Some(date), Some(time)) => (date, time),
        _ => return Err(MalformedTimestamp::MissingFields),
    };

    let date_parts: Vec<&str> = date.split('-').collect();
    let (year, month, day) = match date_parts.as_slice() {
        [y, m, d] => (
            parse_field::<i32>("year", y)?,
            parse_field::<u32>("month", m)?,
            parse_field::<u32>("day", d)?,
        ),
        [m, d] => (
            default_year,
            parse_field::<u32>("month", m)?,
            parse_field::<u32>("day", d)?,
        ),
        other => return Err(MalformedTimestamp::DateFieldCount(other.len())),
    };

    let time_parts: Vec<&str> = time.split(':').collect();
    let [hour, minute, seconds] = time_parts.as_slice() else {
        return Err(MalformedTimestamp::TimeFieldCount(time_parts.len()));
    };
    let hour = parse_field::<u32>("hour", hour)?;
    let minute = parse_field::<u32>("minute", minute)?;

    let seconds: &str = seconds;
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let second = parse_field::<u32>("second", whole)?;
    let microsecond = parse_fraction(fraction)?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || second > 59 {
        return Err(MalformedTimestamp::OutOfRange);
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_micro_opt(hour, minute, second, microsecond))
        .ok_or(MalformedTimestamp::OutOfRange)
}

fn parse_field<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<T, MalformedTimestamp> {
    value.parse().map_err(|_| MalformedTimestamp::NotANumber {
        field,
        value: value.to_string(),
    })
}

/// Convert fractional-second digits to microseconds by right-padding to
/// six digits. An empty fraction is zero.
fn parse_fraction(fraction: &str) -> Result<u32, MalformedTimestamp> {
    if fraction.is_empty() {
        return Ok(0);
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedTimestamp::FractionNotDigits(fraction.to_string()));
    }
    if fraction.len() > FRACTION_DIGITS {
        return Err(MalformedTimestamp::FractionTooLong(fraction.len()));
    }
    let digits: u32 = parse_field("fractional second", fraction)?;
    Ok(digits * 10u32.pow((FRACTION_DIGITS - fraction.len()) as u32))
}
