use crate::cli::DfCli;
use crate::disk::{disk_usage, human_readable, DiskUsage};
use crate::error::Result;
use crate::tools::ToolContext;
use crate::ui::{Column, OutputMode, TableLayout};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const OUTPUT_FIELDS: [&str; 3] = ["Total Space", "Free Space", "Used Space"];

#[derive(Debug, Serialize)]
struct DiskReport {
    path: String,
    #[serde(flatten)]
    usage: DiskUsage,
}

pub struct MiniDf {
    ctx: ToolContext,
}

impl MiniDf {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn from_cli(cli: &DfCli) -> Result<Self> {
        Ok(Self::new(ToolContext::from_args(cli)?))
    }

    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Print one usage table per path. Stops at the first path that cannot be
    /// queried.
    pub fn report<W: Write>(&self, paths: &[PathBuf], out: W) -> Result<()> {
        let mut writer = self.ctx.report_writer(out);
        let width = self.ctx.config().df.column_width;
        let layout = TableLayout::new(vec![Column::padded(width); 3]);

        for path in paths {
            self.ctx.check_shutdown()?;
            let usage = disk_usage(path)?;
            info!(path = %path.display(), "disk usage queried");

            if self.ctx.mode() == OutputMode::Json {
                writer.json(&DiskReport {
                    path: path.display().to_string(),
                    usage,
                })?;
                continue;
            }

            writer.banner("File", &path.display().to_string())?;
            writer.rule('-')?;
            writer.header(&layout, &OUTPUT_FIELDS)?;
            writer.row(&layout, &self.format_usage(&usage))?;
            writer.rule('-')?;
            writer.rule('#')?;
        }

        writer.flush()?;
        self.ctx
            .output_formatter()
            .info(&format!("Reported disk usage for {} path(s)", paths.len()));
        Ok(())
    }

    pub fn format_usage(&self, usage: &DiskUsage) -> [String; 3] {
        let render = |bytes: u64| {
            if self.ctx.config().df.human_readable {
                human_readable(bytes)
            } else {
                bytes.to_string()
            }
        };
        [render(usage.total), render(usage.free), render(usage.used)]
    }
}
