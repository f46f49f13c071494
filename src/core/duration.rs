// LogScan - core/duration.rs
//
// Elapsed time between a start-marker line and an end-marker line.
//
// Single forward pass, independent containment checks per line:
//   - a start-marker line records "start" (later ones overwrite it)
//   - the first end-marker line records "end" and stops the scan
// An end marker met before any start marker still stops the scan, which
// then reports the start marker as not found.

use crate::core::lines::LossyLines;
use crate::core::timestamp::extract_timestamp;
use crate::util::constants;
use crate::util::error::{LogScanError, ParseError};
use crate::util::logging::preview;
use chrono::{Duration, NaiveDateTime};
use std::io::{BufRead, Write};

const SECONDS_PER_DAY: i64 = 86_400;

/// The pair of substrings bounding a timed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: constants::DEFAULT_START_MARKER.to_string(),
            end: constants::DEFAULT_END_MARKER.to_string(),
        }
    }
}

/// Outcome of a duration scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationReport {
    /// Both markers were found.
    Elapsed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// At least one marker was never seen before the scan stopped.
    MarkersNotFound {
        start_marker: String,
        end_marker: String,
        start_found: bool,
        end_found: bool,
    },
}

impl DurationReport {
    /// `end - start`, negative when the end marker carries an earlier time.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Elapsed { start, end } => Some(*end - *start),
            Self::MarkersNotFound { .. } => None,
        }
    }

    /// Write the human-readable report, preceded by a blank line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out)?;
        match self {
            Self::Elapsed { start, end } => {
                writeln!(out, "Test execution time: {}", format_duration(*end - *start))
            }
            Self::MarkersNotFound {
                start_marker,
                end_marker,
                ..
            } => writeln!(
                out,
                "\"{start_marker}\" and/or \"{end_marker}\" string(s) not found."
            ),
        }
    }
}

/// Scan `reader` for the start and end markers and report the elapsed time.
///
/// A marker line whose timestamp cannot be parsed aborts the scan with
/// `ParseError::MalformedTimestamp`.
pub fn measure_duration<R: BufRead>(
    reader: R,
    markers: &Markers,
) -> Result<DurationReport, LogScanError> {
    let mut start: Option<NaiveDateTime> = None;
    let mut end: Option<NaiveDateTime> = None;

    for line in LossyLines::new(reader) {
        let (line_number, text) = line?;

        if text.contains(markers.start.as_str()) {
            let ts = timestamp_of(line_number, &text)?;
            tracing::debug!(line_number, timestamp = %ts, "Start marker found");
            start = Some(ts);
        }
        if text.contains(markers.end.as_str()) {
            let ts = timestamp_of(line_number, &text)?;
            tracing::debug!(line_number, timestamp = %ts, "End marker found");
            end = Some(ts);
            break;
        }
    }

    Ok(match (start, end) {
        (Some(start), Some(end)) => DurationReport::Elapsed { start, end },
        (start, end) => {
            tracing::info!(
                start_found = start.is_some(),
                end_found = end.is_some(),
                "Duration markers missing"
            );
            DurationReport::MarkersNotFound {
                start_marker: markers.start.clone(),
                end_marker: markers.end.clone(),
                start_found: start.is_some(),
                end_found: end.is_some(),
            }
        }
    })
}

fn timestamp_of(line_number: u64, text: &str) -> Result<NaiveDateTime, ParseError> {
    extract_timestamp(text).map_err(|source| ParseError::MalformedTimestamp {
        line_number,
        raw_line: preview(text),
        source,
    })
}

/// Render a duration as `[-][N day(s), ]H:MM:SS[.ffffff]`.
///
/// Microseconds are shown only when non-zero; the sign applies to the whole
/// magnitude.
pub fn format_duration(delta: Duration) -> String {
    let negative = delta < Duration::zero();
    let magnitude = if negative { -delta } else { delta };

    let total_secs = magnitude.num_seconds();
    let micros = (magnitude - Duration::seconds(total_secs)).num_microseconds().unwrap_or(0);

    let days = total_secs / SECONDS_PER_DAY;
    let rem = total_secs % SECONDS_PER_DAY;
    let (hours, minutes, seconds) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days != 0 {
        let unit = if days == 1 { "day" } else { "days" };
        out.push_str(&format!("{days} {unit}, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{seconds:02}"));
    if micros != 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}
