// LogScan - platform/fs.rs
//
// Filesystem access for log files. Each call opens a fresh handle so
// independent scans never share a read cursor; the handle closes when the
// returned reader is dropped, including on error paths.

use crate::util::error::LogScanError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open `path` for a forward-only line scan.
pub fn open_log(path: &Path) -> Result<BufReader<File>, LogScanError> {
    let file = File::open(path).map_err(|source| LogScanError::Io {
        path: path.to_path_buf(),
        operation: "open",
        source,
    })?;
    tracing::debug!(path = %path.display(), "Opened log file");
    Ok(BufReader::new(file))
}
