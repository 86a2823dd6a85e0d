//! Error types for unreal-headless

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unreal-headless operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for unreal-headless
#[derive(Error, Debug)]
pub enum Error {
    /// Settings are missing or invalid (e.g. no project root).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required argument was empty or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file name resolved outside the directory it must live in.
    #[error("Path traversal blocked: {0}")]
    PathTraversal(String),

    /// The config or log file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The requested section is not present in the file.
    #[error("Section [{section}] not found in {file}")]
    SectionNotFound { section: String, file: String },

    /// The requested key is not present in the section.
    #[error("Key {key:?} not found in section [{section}]")]
    KeyNotFound { key: String, section: String },

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Renaming a finished temporary file over its target failed.
    #[error("Failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serializing output failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns true for the absent file/section/key family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::FileNotFound(_) | Error::SectionNotFound { .. } | Error::KeyNotFound { .. }
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
