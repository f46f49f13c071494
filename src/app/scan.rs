// LogScan - app/scan.rs
//
// Runs the operations requested on the command line against one log file.
//
// Order is fixed: duration, include filter, exclude filter. Each operation
// opens the file afresh so no operation observes another's read position.
// The first error aborts the remaining operations.

use crate::core::duration::{self, Markers};
use crate::core::filter::{self, FilterRequest};
use crate::platform::fs::open_log;
use crate::util::error::Result;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Everything one invocation asked for.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Log file to scan.
    pub path: PathBuf,
    /// Report the time between the start and end markers.
    pub duration: bool,
    /// Include-mode filter, if requested.
    pub include: Option<FilterRequest>,
    /// Exclude-mode filter, if requested.
    pub exclude: Option<FilterRequest>,
    /// Markers used by the duration report.
    pub markers: Markers,
}

impl ScanRequest {
    /// A request that runs nothing until operations are enabled.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            duration: false,
            include: None,
            exclude: None,
            markers: Markers::default(),
        }
    }

    /// True when no operation was requested.
    pub fn is_empty(&self) -> bool {
        !self.duration && self.include.is_none() && self.exclude.is_none()
    }
}

/// Execute every requested operation, writing reports to `out`.
pub fn run_scan<W: Write>(request: &ScanRequest, out: &mut W) -> Result<()> {
    if request.is_empty() {
        tracing::info!(path = %request.path.display(), "No operation requested");
        return Ok(());
    }

    if request.duration {
        let started = Instant::now();
        let report = duration::measure_duration(open_log(&request.path)?, &request.markers)?;
        report.write_to(out)?;
        tracing::info!(
            path = %request.path.display(),
            elapsed = ?report.elapsed(),
            took_ms = started.elapsed().as_millis() as u64,
            "Duration scan complete"
        );
    }

    for filter_request in [&request.include, &request.exclude].into_iter().flatten() {
        let started = Instant::now();
        let found = filter::run_filter(open_log(&request.path)?, filter_request, out)?;
        tracing::info!(
            path = %request.path.display(),
            mode = filter_request.mode.label(),
            matches = found,
            took_ms = started.elapsed().as_millis() as u64,
            "Filter scan complete"
        );
    }

    out.flush()?;
    Ok(())
}
