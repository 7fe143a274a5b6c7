//! Error types for the widget components.

use std::path::PathBuf;

/// Result type alias for component operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building widget components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The surface passed to a wrapped element is not a supported form
    /// control.
    #[error("Invalid element passed: expected <input> or <select>, got <{tag}>")]
    InvalidElement { tag: String },

    /// Configuration could not be parsed.
    #[error("Invalid configuration{}: {source}", describe_origin(.path))]
    Config {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in '{}'", p.display()))
        .unwrap_or_default()
}

impl Error {
    /// Create an invalid element error.
    pub fn invalid_element(tag: impl Into<String>) -> Self {
        Self::InvalidElement { tag: tag.into() }
    }

    /// Create a configuration error.
    pub fn config(path: Option<PathBuf>, source: toml::de::Error) -> Self {
        Self::Config { path, source }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
