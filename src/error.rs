//! Error types for the seminar assistant.

use thiserror::Error;

/// Library-level error type for seminar operations.
#[derive(Error, Debug)]
pub enum SeminarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Encyclopedia lookup failed: {0}")]
    Encyclopedia(String),

    #[error("Web search failed: {0}")]
    WebSearch(String),

    #[error("Image fetch failed: {0}")]
    Image(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for seminar operations.
pub type Result<T> = std::result::Result<T, SeminarError>;
