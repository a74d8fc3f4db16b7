use std::path::PathBuf;
use thiserror::Error;

/// Message shown when category data is addressed through the local-file protocol
pub const LOCAL_FILE_MESSAGE: &str = "This page must be served from a web server due to CORS restrictions. \
Please use a local server like \"python3 -m http.server 8000\" and access via http://localhost:8000";

/// PG Portal error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid data source: {0}")]
    InvalidSource(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({resource})")]
    Fetch { resource: String, status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("{}", LOCAL_FILE_MESSAGE)]
    LocalFileProtocol,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for PG Portal operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create an invalid source error
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Error::InvalidSource(msg.into())
    }

    /// Create a fetch error for a non-success status
    pub fn fetch(resource: impl Into<String>, status: u16) -> Self {
        Error::Fetch {
            resource: resource.into(),
            status,
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
