use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemedianError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid TOML: {0}")]
    Toml(String),

    #[error("Unknown rule category: {0}")]
    UnknownCategory(String),

    #[error("Path validation failed: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RemedianError>;
