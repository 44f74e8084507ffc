pub mod df;
pub mod grep;
pub mod ls;

pub use df::MiniDf;
pub use grep::MiniGrep;
pub use ls::MiniLs;

use crate::cli::ToolArgs;
use crate::config::Config;
use crate::error::{Result, ToolError};
use crate::ui::{GracefulShutdown, OutputFormatter, OutputMode, ReportWriter};
use std::io::Write;

/// State every tool carries through one run.
pub struct ToolContext {
    config: Config,
    output_formatter: OutputFormatter,
    shutdown: GracefulShutdown,
}

impl ToolContext {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        Ok(Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            shutdown: GracefulShutdown::new()?,
        })
    }

    /// Same as `new` without installing a Ctrl+C handler.
    pub fn without_signals(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            shutdown: GracefulShutdown::new_for_test(),
        }
    }

    pub fn from_args<A: ToolArgs>(args: &A) -> Result<Self> {
        let config = args.load_config()?;
        Self::new(
            config,
            args.output_mode(),
            args.verbosity_level(),
            args.common().quiet,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn shutdown(&self) -> &GracefulShutdown {
        &self.shutdown
    }

    pub fn mode(&self) -> OutputMode {
        self.output_formatter.mode()
    }

    pub fn report_writer<W: Write>(&self, out: W) -> ReportWriter<W> {
        ReportWriter::new(
            out,
            self.config.output.banner_width,
            self.output_formatter.table_colors(),
        )
    }

    pub fn check_shutdown(&self) -> Result<()> {
        self.shutdown.check_shutdown()
    }

    pub fn handle_error(&self, error: &ToolError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Write a sample configuration file for `--generate-config`.
pub fn generate_sample_config<P: AsRef<std::path::Path>>(output_path: P) -> Result<()> {
    let sample_config = Config::create_sample_config();
    std::fs::write(output_path.as_ref(), sample_config)
        .map_err(|e| ToolError::from_io(output_path.as_ref(), e))?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_context(config: Config) -> ToolContext {
    ToolContext::without_signals(config, OutputMode::Plain, 0, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("minitools.toml");

        generate_sample_config(&config_path).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[df]"));
        assert!(Config::load_from_file(&config_path).is_ok());
    }

    #[test]
    fn test_cancelled_context() {
        let ctx = test_context(Config::default());
        assert!(ctx.check_shutdown().is_ok());

        ctx.shutdown().request_shutdown();
        assert!(matches!(ctx.check_shutdown(), Err(ToolError::Cancelled)));
    }
}
