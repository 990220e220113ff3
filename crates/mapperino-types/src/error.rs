//! Error types for mapperino

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing credential for {service}: set {variable}")]
    MissingCredential {
        service: &'static str,
        variable: &'static str,
    },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("Upload to {service} failed: {message}")]
    Upload {
        service: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
