pub mod cli;
pub mod config;
pub mod disk;
pub mod error;
pub mod listing;
pub mod logging;
pub mod search;
pub mod tools;
pub mod ui;

// Public API re-exports
pub use cli::{CommonArgs, DfCli, GrepCli, LsCli, OutputFormat, ToolArgs};
pub use config::{CliOverrides, Config, DiskConfig, ListConfig, OutputConfig, SearchConfig};
pub use error::{Result, ToolError, UserFriendlyError};

// Core functionality re-exports
pub use disk::{disk_usage, human_readable, DiskUsage};
pub use listing::{collect_tree, list_directory, EntryRecord, ListOptions, Listing, Node, Owner, WalkEvent};
pub use search::{matches_in, search_file, FileListSource, LineMatch, LineMatches, NoPromptSource, PromptSource};
pub use tools::{generate_sample_config, MiniDf, MiniGrep, MiniLs, ToolContext};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode};

/// Shared `--generate-config` handling for the binaries. Returns the exit code.
pub fn handle_generate_config(common: &CommonArgs) -> i32 {
    let config_path = common
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "minitools.toml".to_string());

    match generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nEdit the file to customize settings, then pass it with --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

/// Print a startup failure (before a tool context exists).
pub fn print_startup_error(common: &CommonArgs, error: &ToolError) {
    let formatter = OutputFormatter::new(common.output_format.into(), 0, false);
    formatter.print_user_friendly_error(error);
}
