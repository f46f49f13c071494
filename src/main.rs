// LogScan - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml)
// 3. Logging initialisation (debug mode support)
// 4. Running the requested scans against the log file

use clap::Parser;
use logscan::app::scan::{run_scan, ScanRequest};
use logscan::core::duration::Markers;
use logscan::core::filter::{FilterMode, FilterRequest};
use logscan::platform::config::{self, AppConfig, PlatformPaths};
use logscan::util;
use logscan::util::error::{LogScanError, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// LogScan - scan a test log for run duration and word matches.
#[derive(Parser, Debug)]
#[command(name = "logscan", version, about)]
struct Cli {
    /// Logfile to be parsed.
    logfile: PathBuf,

    /// Prints out lines containing all of the comma-separated words.
    #[arg(short = 'i', value_name = "WORDS,...")]
    include: Option<String>,

    /// Prints out lines missing at least one of the comma-separated words.
    #[arg(short = 'e', value_name = "WORDS,...")]
    exclude: Option<String>,

    /// Prints out the time difference between the lines containing
    /// "TEST STARTED" and "TEST FINISHED".
    #[arg(short = 's')]
    duration: bool,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (app_config, config_warnings) = match load_app_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => return report_failure(&e),
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        path = %cli.logfile.display(),
        duration = cli.duration,
        include = ?cli.include,
        exclude = ?cli.exclude,
        "LogScan starting"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &app_config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

/// Load the config named by `-c`, or the platform default.
///
/// An explicitly named file must exist and parse; the default may be absent.
fn load_app_config(cli: &Cli) -> Result<(AppConfig, Vec<String>)> {
    match cli.config {
        Some(ref path) => Ok(config::load_config_strict(path)?),
        None => Ok(config::load_config(
            &PlatformPaths::resolve().config_file(),
        )),
    }
}

/// Run every operation requested on the command line.
fn run<W: Write>(cli: &Cli, app_config: &AppConfig, out: &mut W) -> Result<()> {
    run_scan(&build_request(cli, app_config), out)
}

/// Print the failure once on stderr and pick the exit code.
fn report_failure(e: &LogScanError) -> ExitCode {
    tracing::debug!(error = ?e, "Invocation failed");
    eprintln!("Error: {e}");
    ExitCode::FAILURE
}

fn build_request(cli: &Cli, app_config: &AppConfig) -> ScanRequest {
    let mut request = ScanRequest::new(cli.logfile.clone());
    request.duration = cli.duration;
    request.markers = Markers {
        start: app_config.start_marker.clone(),
        end: app_config.end_marker.clone(),
    };
    request.include = cli
        .include
        .as_deref()
        .map(|words| FilterRequest::from_csv(FilterMode::Include, words));
    request.exclude = cli
        .exclude
        .as_deref()
        .map(|words| FilterRequest::from_csv(FilterMode::Exclude, words));
    request
}
