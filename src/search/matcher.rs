use crate::error::{Result, ToolError};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// One line containing the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    /// 1-based position in the file.
    pub line_number: usize,
    pub text: String,
}

/// Lazy, forward-only iterator over the lines of `R` that contain a pattern.
pub struct LineMatches<R> {
    reader: R,
    pattern: String,
    line_number: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineMatches<R> {
    pub fn new(reader: R, pattern: impl Into<String>) -> Self {
        Self {
            reader,
            pattern: pattern.into(),
            line_number: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for LineMatches<R> {
    type Item = io::Result<LineMatch>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.read_line() {
                Ok(Some(text)) => {
                    self.line_number += 1;
                    if text.contains(self.pattern.as_str()) {
                        return Some(Ok(LineMatch {
                            line_number: self.line_number,
                            text,
                        }));
                    }
                }
                Ok(None) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Match `pattern` against any buffered reader.
pub fn matches_in<R: BufRead>(reader: R, pattern: &str) -> LineMatches<R> {
    LineMatches::new(reader, pattern)
}

/// Open `path` for searching. The path must name an existing regular file;
/// nothing is read until the iterator is polled.
pub fn search_file<P: AsRef<Path>>(path: P, pattern: &str) -> Result<LineMatches<BufReader<File>>> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| ToolError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(ToolError::wrong_kind(path, "regular file"));
    }

    let file = File::open(path).map_err(|e| ToolError::from_io(path, e))?;
    debug!(path = %path.display(), pattern, "opened file for search");

    Ok(matches_in(BufReader::new(file), pattern))
}
