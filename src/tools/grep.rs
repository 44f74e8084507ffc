use crate::cli::GrepCli;
use crate::error::{Result, ToolError};
use crate::search::{search_file, FileListSource, LineMatch, NoPromptSource, PromptSource};
use crate::tools::ToolContext;
use crate::ui::{Column, OutputMode, TableLayout};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    path: String,
    pattern: &'a str,
    matches: Vec<LineMatch>,
}

pub struct MiniGrep {
    ctx: ToolContext,
}

impl MiniGrep {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn from_cli(cli: &GrepCli) -> Result<Self> {
        Ok(Self::new(ToolContext::from_args(cli)?))
    }

    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Interactive prompt on stdin, or the non-interactive source when
    /// prompting is disabled.
    pub fn file_list_source(&self) -> Box<dyn FileListSource> {
        if self.ctx.config().grep.prompt_for_files {
            Box::new(PromptSource::new(io::stdin().lock(), io::stderr()))
        } else {
            Box::new(NoPromptSource)
        }
    }

    /// Use `given` when non-empty, otherwise ask `source`.
    pub fn resolve_files(
        &self,
        given: &[PathBuf],
        pattern: &str,
        source: &mut dyn FileListSource,
    ) -> Result<Vec<PathBuf>> {
        if !given.is_empty() {
            return Ok(given.to_vec());
        }

        let files = source.file_list(pattern)?;
        debug!(count = files.len(), "file list read from source");
        Ok(files.into_iter().map(PathBuf::from).collect())
    }

    fn layout(&self) -> (TableLayout, Vec<&'static str>) {
        let grep = &self.ctx.config().grep;
        if grep.show_line_numbers {
            (
                TableLayout::new(vec![
                    Column::padded(grep.number_width),
                    Column::truncated(grep.text_width),
                ]),
                vec!["No", "Line"],
            )
        } else {
            (
                TableLayout::new(vec![Column::truncated(grep.text_width)]),
                vec!["Line"],
            )
        }
    }

    /// Search every file in order and print the matches as they are found.
    /// Returns the total number of matching lines.
    pub fn report<W: Write>(&self, pattern: &str, files: &[PathBuf], out: W) -> Result<usize> {
        let mut writer = self.ctx.report_writer(out);
        let (layout, header) = self.layout();
        let show_line_numbers = self.ctx.config().grep.show_line_numbers;
        let mut total = 0;

        if pattern.is_empty() {
            self.ctx
                .output_formatter()
                .warning("Empty pattern matches every line");
        }

        for file in files {
            self.ctx.check_shutdown()?;
            let matches = search_file(file, pattern)?;

            if self.ctx.mode() == OutputMode::Json {
                let mut found = Vec::new();
                for line_match in matches {
                    self.ctx.check_shutdown()?;
                    found.push(line_match.map_err(|e| ToolError::from_io(file, e))?);
                }
                total += found.len();
                writer.json(&SearchReport {
                    path: file.display().to_string(),
                    pattern,
                    matches: found,
                })?;
                continue;
            }

            writer.banner("File", &file.display().to_string())?;
            writer.rule('-')?;
            writer.header(&layout, header.as_slice())?;

            let mut count = 0;
            for line_match in matches {
                self.ctx.check_shutdown()?;
                let line_match = line_match.map_err(|e| ToolError::from_io(file, e))?;
                if show_line_numbers {
                    writer.row(&layout, &[line_match.line_number.to_string(), line_match.text])?;
                } else {
                    writer.row(&layout, &[line_match.text])?;
                }
                count += 1;
            }
            writer.rule('-')?;

            info!(path = %file.display(), matches = count, "searched file");
            total += count;
        }

        if !files.is_empty() && self.ctx.mode() != OutputMode::Json {
            writer.rule('#')?;
        }
        writer.flush()?;
        self.ctx
            .output_formatter()
            .info(&format!("Found {} matching lines in {} file(s)", total, files.len()));
        Ok(total)
    }
}
