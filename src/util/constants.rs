// LogScan - util/constants.rs
//
// Single source of truth for named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogScan";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogScan";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Duration markers
// =============================================================================

/// Substring identifying the line that opens a timed test run.
pub const DEFAULT_START_MARKER: &str = "TEST STARTED";

/// Substring identifying the line that closes a timed test run.
pub const DEFAULT_END_MARKER: &str = "TEST FINISHED";

// =============================================================================
// Timestamp parsing
// =============================================================================

/// Number of digits the fractional-second field is padded to (microseconds).
pub const FRACTION_DIGITS: usize = 6;

// =============================================================================
// Filtering
// =============================================================================

/// Separator used to split the `-i` / `-e` word arguments.
pub const WORD_SEPARATOR: char = ',';

/// Character used to underline the filter summary line.
pub const SUMMARY_UNDERLINE: char = '=';

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Diagnostics go to stderr; stdout carries the reports,
/// so anything chattier than `warn` is opt-in.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in diagnostics and error messages.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
