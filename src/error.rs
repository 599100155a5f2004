// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModgraphError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Syntax error in {path}")]
    Parse { path: PathBuf },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Render backend error: {0}")]
    Backend(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(String),
}

pub type Result<T> = std::result::Result<T, ModgraphError>;

impl ModgraphError {
    /// Wraps an I/O error with the path it happened on.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to ModgraphError::Io with unknown path.
impl From<std::io::Error> for ModgraphError {
    fn from(source: std::io::Error) -> Self {
        ModgraphError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for ModgraphError {
    fn from(e: walkdir::Error) -> Self {
        ModgraphError::Walk(e.to_string())
    }
}
