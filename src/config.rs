use crate::error::{Result, ToolError};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub df: DiskConfig,
    pub grep: SearchConfig,
    pub ls: ListConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub banner_width: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiskConfig {
    pub human_readable: bool,
    pub column_width: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub show_line_numbers: bool,
    pub prompt_for_files: bool,
    pub number_width: usize,
    pub text_width: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListConfig {
    pub recursive: bool,
    pub follow_links: bool,
    pub name_width: usize,
    pub permissions_width: usize,
    pub owner_width: usize,
    pub modified_width: usize,
    pub timestamp_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { banner_width: 70 }
    }
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            human_readable: false,
            column_width: 15,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            prompt_for_files: true,
            number_width: 5,
            text_width: 400,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            follow_links: false,
            name_width: 20,
            permissions_width: 15,
            owner_width: 10,
            modified_width: 30,
            // Same layout as ctime(3)
            timestamp_format: "%a %b %e %H:%M:%S %Y".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ToolError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ToolError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ToolError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["minitools.toml", ".minitools.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(human_readable) = cli_args.human_readable {
            self.df.human_readable = human_readable;
        }

        if let Some(show_line_numbers) = cli_args.show_line_numbers {
            self.grep.show_line_numbers = show_line_numbers;
        }

        if let Some(prompt_for_files) = cli_args.prompt_for_files {
            self.grep.prompt_for_files = prompt_for_files;
        }

        if let Some(recursive) = cli_args.recursive {
            self.ls.recursive = recursive;
        }

        if let Some(follow_links) = cli_args.follow_links {
            self.ls.follow_links = follow_links;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.banner_width == 0 {
            return Err(ToolError::Config {
                message: "Banner width must be greater than 0".to_string(),
            });
        }

        let widths = [
            ("df.column_width", self.df.column_width),
            ("grep.number_width", self.grep.number_width),
            ("grep.text_width", self.grep.text_width),
            ("ls.name_width", self.ls.name_width),
            ("ls.permissions_width", self.ls.permissions_width),
            ("ls.owner_width", self.ls.owner_width),
            ("ls.modified_width", self.ls.modified_width),
        ];
        if let Some((name, _)) = widths.iter().find(|(_, width)| *width == 0) {
            return Err(ToolError::Config {
                message: format!("{} must be greater than 0", name),
            });
        }

        let format = &self.ls.timestamp_format;
        if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ToolError::Config {
                message: format!("Invalid timestamp format: {:?}", format),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub human_readable: Option<bool>,
    pub show_line_numbers: Option<bool>,
    pub prompt_for_files: Option<bool>,
    pub recursive: Option<bool>,
    pub follow_links: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_human_readable(mut self, human_readable: Option<bool>) -> Self {
        self.human_readable = human_readable;
        self
    }

    pub fn with_line_numbers(mut self, show: Option<bool>) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn with_prompt(mut self, prompt: Option<bool>) -> Self {
        self.prompt_for_files = prompt;
        self
    }

    pub fn with_recursive(mut self, recursive: Option<bool>) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_follow_links(mut self, follow_links: Option<bool>) -> Self {
        self.follow_links = follow_links;
        self
    }
}
