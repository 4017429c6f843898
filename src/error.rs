use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("HTTP client unavailable: best-name was built without the `http` feature")]
    DependencyUnavailable,

    #[error("{0}")]
    Request(#[from] RequestError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Failures talking to the completion endpoint. Never retried.
#[derive(Debug, Error)]
pub(crate) enum RequestError {
    #[cfg(feature = "http")]
    #[error("Request to completion endpoint failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("Completion endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    Malformed(String),
}

/// Extraction failures. Absorbed by the extractor, never shown to the user.
#[derive(Debug, Error)]
pub(crate) enum ExtractError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{format} conversion failed: {message}")]
    Convert {
        format: &'static str,
        message: String,
    },

    #[error("{format} converter panicked")]
    Panicked { format: &'static str },
}
