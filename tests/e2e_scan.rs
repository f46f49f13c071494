// LogScan - tests/e2e_scan.rs
//
// End-to-end tests for the scan pipeline.
//
// These tests exercise real files on disk, real chrono timestamp parsing
// and the full path from a log file to the text written on stdout. No
// mocks, no stubs.

use logscan::app::scan::{run_scan, ScanRequest};
use logscan::core::duration::{measure_duration, DurationReport, Markers};
use logscan::core::filter::{FilterMode, FilterRequest};
use logscan::platform::config::load_config;
use logscan::platform::fs::open_log;
use logscan::util::error::{LogScanError, MalformedTimestamp, ParseError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run `request` and return everything written to the output stream.
fn scan_output(request: &ScanRequest) -> String {
    let mut out = Vec::new();
    run_scan(request, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Duration E2E
// =============================================================================

/// The first TEST FINISHED line closes the interval; the second is ignored.
#[test]
fn e2e_duration_from_fixture() {
    let mut request = ScanRequest::new(fixture("test_run.log"));
    request.duration = true;
    assert_eq!(
        scan_output(&request),
        "\nTest execution time: 0:01:30.500000\n"
    );
}

/// Year-less logcat dates crossing midnight, with CRLF terminators.
#[test]
fn e2e_duration_yearless_dates_cross_midnight() {
    let report =
        measure_duration(open_log(&fixture("logcat_yearless.log")).unwrap(), &Markers::default())
            .unwrap();
    assert_eq!(
        report.elapsed(),
        Some(chrono::Duration::milliseconds(4_750))
    );
}

#[test]
fn e2e_duration_missing_end_marker() {
    let mut request = ScanRequest::new(fixture("no_finish.log"));
    request.duration = true;
    assert_eq!(
        scan_output(&request),
        "\n\"TEST STARTED\" and/or \"TEST FINISHED\" string(s) not found.\n"
    );
}

#[test]
fn e2e_duration_malformed_marker_line_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.log");
    fs::write(&path, "2024-03-11 09:15:01.1234567 TEST STARTED\n").unwrap();

    let result = measure_duration(open_log(&path).unwrap(), &Markers::default());
    match result {
        Err(LogScanError::Parse(ParseError::MalformedTimestamp {
            line_number,
            source,
            ..
        })) => {
            assert_eq!(line_number, 1);
            assert_eq!(source, MalformedTimestamp::FractionTooLong(7));
        }
        other => panic!("expected MalformedTimestamp, got {other:?}"),
    }
}

// =============================================================================
// Filter E2E
// =============================================================================

#[test]
fn e2e_include_filter_from_fixture() {
    let mut request = ScanRequest::new(fixture("test_run.log"));
    request.include = Some(FilterRequest::from_csv(FilterMode::Include, "ERROR,net"));
    let out = scan_output(&request);

    let expected_match = "2024-03-11 09:15:04.750 ERROR net: connect timeout after 2000ms\n";
    assert!(out.starts_with("\nLine(s) containing words ['ERROR', 'net']:\n"));
    assert!(out.contains(expected_match));
    assert!(out.ends_with("1 line contains all required words.\n"));
    assert!(!out.contains("db: query failed"));
}

#[test]
fn e2e_exclude_filter_from_fixture() {
    let mut request = ScanRequest::new(fixture("test_run.log"));
    request.exclude = Some(FilterRequest::from_csv(FilterMode::Exclude, "INFO"));
    let out = scan_output(&request);

    assert!(out.contains("WARN  net: retrying connect"));
    assert!(out.contains("ERROR db: query failed"));
    assert!(!out.contains("runner:"));
    assert!(out.ends_with("3 lines missing any of required words.\n"));
}

/// Filtering is deterministic and keeps input order across runs.
#[test]
fn e2e_filter_rerun_is_identical() {
    let mut request = ScanRequest::new(fixture("test_run.log"));
    request.include = Some(FilterRequest::from_csv(FilterMode::Include, "ERROR"));
    let first = scan_output(&request);
    let second = scan_output(&request);
    assert_eq!(first, second);

    let db = first.find("db: query failed").unwrap();
    let net = first.find("net: connect timeout").unwrap();
    assert!(net < db);
}

// =============================================================================
// Combined invocation
// =============================================================================

/// All three operations in one invocation, each reading the whole file.
#[test]
fn e2e_all_operations_share_no_cursor() {
    let mut request = ScanRequest::new(fixture("test_run.log"));
    request.duration = true;
    request.include = Some(FilterRequest::from_csv(FilterMode::Include, "preparing"));
    request.exclude = Some(FilterRequest::from_csv(FilterMode::Exclude, "2024"));
    let out = scan_output(&request);

    // The include scan still sees line 1 even though the duration scan ran first.
    assert!(out.contains("runner: preparing environment"));
    assert!(out.contains("1 line contains all required words."));
    assert!(out.contains("No line missing any of required words."));
}

#[test]
fn e2e_missing_log_file_reports_path() {
    let mut request = ScanRequest::new(fixture("does_not_exist.log"));
    request.include = Some(FilterRequest::from_csv(FilterMode::Include, "x"));
    let mut out = Vec::new();
    let err = run_scan(&request, &mut out).unwrap_err();
    assert!(err.to_string().contains("does_not_exist.log"));
}

// =============================================================================
// Config E2E
// =============================================================================

/// Markers from config.toml drive the duration scan.
#[test]
fn e2e_config_markers_drive_duration() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[markers]\nstart = \"suite=network\"\nend = \"db: query failed\"\n",
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path);
    assert!(warnings.is_empty(), "{warnings:?}");

    let markers = Markers {
        start: config.start_marker,
        end: config.end_marker,
    };
    let report =
        measure_duration(open_log(&fixture("test_run.log")).unwrap(), &markers).unwrap();
    assert!(matches!(report, DurationReport::Elapsed { .. }));
    assert_eq!(
        report.elapsed(),
        Some(chrono::Duration::milliseconds(3_881))
    );
}
