use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrtTranslateError {
    #[error("Source directory does not exist: {0}")]
    SourceDirectoryNotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Failed to publish {path}: {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SrtTranslateError>;
