use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextgramError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source Unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid Parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type TgResult<T> = Result<T, TextgramError>;
