use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Path does not exist: {path}: {source}")]
    NotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Path is not a {expected}: {path}")]
    WrongKind { path: String, expected: &'static str },

    #[error("Permission denied: {path}: {source}")]
    Permission {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("IO operation failed on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("No files given to search")]
    NoInput,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl ToolError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound {
                path,
                source: error,
            },
            io::ErrorKind::PermissionDenied => ToolError::Permission {
                path,
                source: error,
            },
            _ => ToolError::Io {
                path,
                source: error,
            },
        }
    }

    pub fn wrong_kind(path: &Path, expected: &'static str) -> Self {
        ToolError::WrongKind {
            path: path.display().to_string(),
            expected,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Cancelled => 130, // Interrupted (SIGINT)
            ToolError::NotFound { .. } => 2,
            ToolError::WrongKind { .. } => 3,
            ToolError::Permission { .. } => 4,
            ToolError::Io { .. } => 5,
            ToolError::NoInput => 6,
            _ => 1,
        }
    }
}

impl From<walkdir::Error> for ToolError {
    fn from(error: walkdir::Error) -> Self {
        let path = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        if let Some(ancestor) = error.loop_ancestor() {
            return ToolError::Io {
                source: io::Error::new(
                    io::ErrorKind::Other,
                    format!("filesystem loop back to {}", ancestor.display()),
                ),
                path,
            };
        }

        match error.into_io_error() {
            Some(source) => ToolError::from_io(Path::new(&path), source),
            None => ToolError::Io {
                source: io::Error::new(io::ErrorKind::Other, "directory walk failed"),
                path,
            },
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ToolError {
    fn user_message(&self) -> String {
        match self {
            ToolError::NotFound { path, source } => {
                format!("Error! Path {} doesn't exist: {}", path, source)
            }
            ToolError::WrongKind { path, expected } => {
                format!("Error! {} is not a valid {}", path, expected)
            }
            ToolError::Permission { path, source } => {
                format!("Permission denied accessing {}: {}", path, source)
            }
            ToolError::Io { path, source } => {
                format!("{}: {}", path, source)
            }
            ToolError::NoInput => {
                "Error! Couldn't parse files to search".to_string()
            }
            ToolError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ToolError::NotFound { .. } | ToolError::Io { .. } => {
                Some("Please pass a valid file path.".to_string())
            }
            ToolError::WrongKind { expected, .. } => {
                Some(format!("Please provide the path of a {}.", expected))
            }
            ToolError::Permission { .. } => Some(
                "Ensure you have read permission for the path and its parent directories.".to_string(),
            ),
            ToolError::NoInput => Some(
                "Provide files separated by spaces, e.g. /var/log/syslog /etc/hosts, or pass them with -f.".to_string(),
            ),
            ToolError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string(),
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
