use crate::config::{CliOverrides, Config};
use crate::error::{Result, ToolError};
use crate::ui::OutputMode;
use clap::{Args, Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Flags shared by every tool.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose diagnostics (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Tables with colored headers when the terminal supports it
    Human,
    /// One JSON document per input path
    Json,
    /// Tables without styling
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "minidf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List disk usage information")]
#[command(after_help = "EXAMPLES:\n  \
    minidf\n  \
    minidf -H -f /home /var")]
pub struct DfCli {
    /// Human-readable sizes
    #[arg(short = 'H', help = "Print sizes in human readable units (KB, MB, ...)")]
    pub human_readable: bool,

    /// Paths whose filesystems are reported (defaults to the current directory)
    #[arg(short = 'f', long = "files", num_args = 0.., value_name = "PATH")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "minigrep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search files for a pattern")]
#[command(after_help = "EXAMPLES:\n  \
    minigrep -e linux -f /var/log/syslog\n  \
    minigrep -q -e TODO -f src/main.rs src/lib.rs")]
pub struct GrepCli {
    /// Skip the line number column
    #[arg(short = 'q', help = "Do not print line numbers of matching lines")]
    pub no_line_numbers: bool,

    /// Substring to search for
    #[arg(
        short = 'e',
        long = "pattern",
        required_unless_present = "generate_config",
        help = "Pattern to search, e.g. -e Linux"
    )]
    pub pattern: Option<String>,

    /// Files to search; asked for on stdin when omitted
    #[arg(short = 'f', long = "files", num_args = 0.., value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Fail instead of prompting when no files are given
    #[arg(long)]
    pub no_prompt: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "minils")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List information about the paths")]
#[command(after_help = "EXAMPLES:\n  \
    minils\n  \
    minils -r -f /etc /tmp")]
pub struct LsCli {
    /// Recurse into subdirectories
    #[arg(short = 'r', help = "Run recursively on all directories")]
    pub recursive: bool,

    /// Follow symbolic links while recursing
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Directories to list (defaults to the current directory)
    #[arg(short = 'f', long = "files", num_args = 0.., value_name = "PATH")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Configuration loading shared by the three tools.
pub trait ToolArgs {
    fn common(&self) -> &CommonArgs;

    fn create_cli_overrides(&self) -> CliOverrides;

    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.common().config.as_ref())?;
        config.merge_with_cli_args(&self.create_cli_overrides());
        config.validate()?;
        Ok(config)
    }

    fn output_mode(&self) -> OutputMode {
        self.common().output_format.into()
    }

    fn verbosity_level(&self) -> u8 {
        if self.common().quiet {
            0
        } else {
            self.common().verbose
        }
    }
}

impl ToolArgs for DfCli {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new().with_human_readable(self.human_readable.then_some(true))
    }
}

impl GrepCli {
    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or_default()
    }
}

impl ToolArgs for GrepCli {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_line_numbers(self.no_line_numbers.then_some(false))
            .with_prompt(self.no_prompt.then_some(false))
    }
}

impl ToolArgs for LsCli {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_recursive(self.recursive.then_some(true))
            .with_follow_links(self.follow_links.then_some(true))
    }
}

/// The given paths, or the current directory when there are none.
pub fn paths_or_current_dir(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !files.is_empty() {
        return Ok(files.to_vec());
    }
    let cwd = std::env::current_dir().map_err(|e| ToolError::from_io(Path::new("."), e))?;
    Ok(vec![cwd])
}
