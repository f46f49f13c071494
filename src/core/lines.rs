// LogScan - core/lines.rs
//
// Forward-only line reader over any `BufRead`.
// Invalid UTF-8 is replaced rather than aborting the scan, matching how
// the scanners only ever look for ASCII markers and words.

use crate::util::error::ParseError;
use std::io::BufRead;

/// Iterator over the lines of a log stream.
///
/// Yields `(line_number, text)` with the line terminator (`\n` or `\r\n`)
/// removed. Line numbers are 1-based.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: u64,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = Result<(u64, String), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        self.line_number += 1;
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                // Only `\n` terminates a line; a bare `\r` stays in the text.
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                let text = String::from_utf8_lossy(&self.buf).into_owned();
                Some(Ok((self.line_number, text)))
            }
            Err(source) => Some(Err(ParseError::Read {
                line_number: self.line_number,
                source,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    /// Yields `data` once, then fails every read.
    struct FailingReader {
        data: Option<&'static [u8]>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(data);
                    Ok(data.len())
                }
                None => Err(io::Error::new(io::ErrorKind::Other, "boom")),
            }
        }
    }

    fn collect(input: &[u8]) -> Vec<(u64, String)> {
        LossyLines::new(Cursor::new(input))
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_strips_lf_and_crlf() {
        let lines = collect(b"first\r\nsecond\nthird");
        assert_eq!(
            lines,
            vec![
                (1, "first".to_string()),
                (2, "second".to_string()),
                (3, "third".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let lines = collect(b"a\n\nb\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], (2, String::new()));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect(b"ok \xff ERROR\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].1.contains("ERROR"));
        assert!(lines[0].1.contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_failure_carries_line_number() {
        let reader = BufReader::new(FailingReader {
            data: Some(b"ok\nok\n"),
        });
        let mut lines = LossyLines::new(reader);

        assert_eq!(lines.next().unwrap().unwrap(), (1, "ok".to_string()));
        assert_eq!(lines.next().unwrap().unwrap(), (2, "ok".to_string()));
        match lines.next() {
            Some(Err(ParseError::Read {
                line_number,
                source,
            })) => {
                assert_eq!(line_number, 3);
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_carriage_return_does_not_split() {
        let lines = collect(b"a\rb\n");
        assert_eq!(lines, vec![(1, "a\rb".to_string())]);
    }
}
