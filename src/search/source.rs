//! Where `minigrep` gets its file list when none is given with `-f`.

use crate::error::{Result, ToolError};
use std::io::{BufRead, Write};
use std::path::Path;

pub trait FileListSource {
    /// Produce the files to search for `pattern`. An empty list is an error.
    fn file_list(&mut self, pattern: &str) -> Result<Vec<String>>;
}

/// Asks for a whitespace-separated list of paths on one input line.
pub struct PromptSource<R, W> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }
}

impl<R: BufRead, W: Write> FileListSource for PromptSource<R, W> {
    fn file_list(&mut self, pattern: &str) -> Result<Vec<String>> {
        writeln!(self.prompt, "Please provide files to search pattern: {}", pattern)?;
        self.prompt.flush()?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| ToolError::from_io(Path::new("<stdin>"), e))?;

        let files: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if files.is_empty() {
            return Err(ToolError::NoInput);
        }
        Ok(files)
    }
}

/// Non-interactive source for scripted runs: never has any files.
#[derive(Debug, Default)]
pub struct NoPromptSource;

impl FileListSource for NoPromptSource {
    fn file_list(&mut self, _pattern: &str) -> Result<Vec<String>> {
        Err(ToolError::NoInput)
    }
}
