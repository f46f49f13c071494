// LogScan - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps its cause so
// `main` can print the full chain.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogScan operations.
#[derive(Debug)]
pub enum LogScanError {
    /// Reading or interpreting the log content failed.
    Parse(ParseError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// I/O error with path context (opening the log file).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Writing a report to the output stream failed.
    Output { source: io::Error },
}

impl fmt::Display for LogScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Output { source } => write!(f, "Failed to write report: {source}"),
        }
    }
}

impl std::error::Error for LogScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Output { source } => Some(source),
        }
    }
}

impl From<io::Error> for LogScanError {
    /// Bare I/O errors only arise from report writers.
    fn from(source: io::Error) -> Self {
        Self::Output { source }
    }
}

// ---------------------------------------------------------------------------
// Timestamp errors
// ---------------------------------------------------------------------------

/// Why a line's leading date/time fields could not be turned into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTimestamp {
    /// Fewer than two whitespace-separated tokens on the line.
    MissingFields,

    /// The date token did not split into 2 or 3 `-` separated parts.
    DateFieldCount(usize),

    /// The time token did not split into exactly 3 `:` separated parts.
    TimeFieldCount(usize),

    /// A numeric subfield did not parse as an integer.
    NotANumber { field: &'static str, value: String },

    /// The fractional-second part has more digits than microseconds hold.
    FractionTooLong(usize),

    /// The fractional-second part contains non-digit characters.
    FractionNotDigits(String),

    /// All fields parsed but do not name a real calendar moment.
    OutOfRange,
}

impl fmt::Display for MalformedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "expected a date and a time field"),
            Self::DateFieldCount(n) => {
                write!(f, "date field has {n} '-' separated parts, expected 2 or 3")
            }
            Self::TimeFieldCount(n) => {
                write!(f, "time field has {n} ':' separated parts, expected 3")
            }
            Self::NotANumber { field, value } => {
                write!(f, "{field} '{value}' is not an integer")
            }
            Self::FractionTooLong(len) => write!(
                f,
                "fractional second has {len} digits, at most {} supported",
                super::constants::FRACTION_DIGITS
            ),
            Self::FractionNotDigits(value) => {
                write!(f, "fractional second '{value}' is not a digit string")
            }
            Self::OutOfRange => write!(f, "date/time components out of range"),
        }
    }
}

impl std::error::Error for MalformedTimestamp {}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to reading and interpreting log lines.
#[derive(Debug)]
pub enum ParseError {
    /// A marker line carried no parseable timestamp.
    MalformedTimestamp {
        line_number: u64,
        raw_line: String,
        source: MalformedTimestamp,
    },

    /// Reading a line from the log stream failed.
    Read { line_number: u64, source: io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimestamp {
                line_number,
                raw_line,
                source,
            } => write!(
                f,
                "line {line_number}: malformed timestamp in '{raw_line}': {source}"
            ),
            Self::Read {
                line_number,
                source,
            } => write!(f, "line {line_number}: read failed: {source}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedTimestamp { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for LogScanError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is not acceptable.
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::InvalidValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is not valid. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<ConfigError> for LogScanError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogScan results.
pub type Result<T> = std::result::Result<T, LogScanError>;
