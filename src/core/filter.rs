// LogScan - core/filter.rs
//
// Word-containment filter over log lines.
//   Include: a line matches when it contains every word.
//   Exclude: a line matches when it is missing at least one word.
// Every line is visited; matches are written in input order.

use crate::core::lines::LossyLines;
use crate::util::constants;
use crate::util::error::LogScanError;
use std::io::{BufRead, Write};

/// Which side of the containment test is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Include,
    Exclude,
}

impl FilterMode {
    /// Short label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::Include => "include",
            FilterMode::Exclude => "exclude",
        }
    }
}

/// A set of required words and the mode they are applied in.
///
/// Word order and duplicates do not affect matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub mode: FilterMode,
    pub words: Vec<String>,
}

impl FilterRequest {
    pub fn new(mode: FilterMode, words: Vec<String>) -> Self {
        Self { mode, words }
    }

    /// Build a request from a comma-separated argument such as `"ERROR,timeout"`.
    ///
    /// Splitting is literal: no trimming, and empty pieces are kept.
    pub fn from_csv(mode: FilterMode, arg: &str) -> Self {
        let words = arg
            .split(constants::WORD_SEPARATOR)
            .map(str::to_string)
            .collect();
        Self { mode, words }
    }

    /// True when `line` satisfies the request.
    ///
    /// With no words, include matches every line and exclude matches none.
    pub fn matches(&self, line: &str) -> bool {
        match self.mode {
            FilterMode::Include => self.words.iter().all(|w| line.contains(w.as_str())),
            FilterMode::Exclude => self.words.iter().any(|w| !line.contains(w.as_str())),
        }
    }

    fn header(&self) -> String {
        let list = self.quoted_words();
        match self.mode {
            FilterMode::Include => format!("Line(s) containing words {list}:"),
            FilterMode::Exclude => format!("Line(s) not containing any of words {list}:"),
        }
    }

    /// Word list rendered as `['a', 'b']`.
    fn quoted_words(&self) -> String {
        let quoted: Vec<String> = self.words.iter().map(|w| format!("'{w}'")).collect();
        format!("[{}]", quoted.join(", "))
    }
}

/// Summary sentence for `count` matches.
pub fn summary_message(mode: FilterMode, count: usize) -> String {
    match (mode, count) {
        (FilterMode::Include, 0) => "No line containing all required words.".to_string(),
        (FilterMode::Include, 1) => "1 line contains all required words.".to_string(),
        (FilterMode::Include, n) => format!("{n} lines contain all required words."),
        (FilterMode::Exclude, 0) => "No line missing any of required words.".to_string(),
        (FilterMode::Exclude, 1) => "1 line missing any of required words.".to_string(),
        (FilterMode::Exclude, n) => format!("{n} lines missing any of required words."),
    }
}

/// Scan `reader`, writing the header, every matching line, and the
/// underlined summary to `out`. Returns the number of matching lines.
pub fn run_filter<R: BufRead, W: Write>(
    reader: R,
    request: &FilterRequest,
    out: &mut W,
) -> Result<usize, LogScanError> {
    writeln!(out)?;
    writeln!(out, "{}", request.header())?;

    let mut found = 0usize;
    let mut lines_scanned = 0u64;
    for line in LossyLines::new(reader) {
        let (line_number, text) = line?;
        lines_scanned = line_number;
        if request.matches(&text) {
            found += 1;
            writeln!(out, "{text}")?;
        }
    }

    let summary = summary_message(request.mode, found);
    let underline = constants::SUMMARY_UNDERLINE
        .to_string()
        .repeat(summary.chars().count());
    writeln!(out, "{underline}")?;
    writeln!(out, "{summary}")?;

    tracing::debug!(
        mode = request.mode.label(),
        words = ?request.words,
        lines_scanned,
        matches = found,
        "Filter complete"
    );

    Ok(found)
}
