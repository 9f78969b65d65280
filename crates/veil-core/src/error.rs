use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid source URI: {0}")]
    InvalidSourceUri(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid substitute for '{original}': {reason}")]
    InvalidSubstitute { original: String, reason: String },

    #[error("No substitute recorded for '{0}'")]
    MissingSubstitute(String),

    #[error("Extractor error: {0}")]
    Extractor(String),

    #[error("Model request failed: {0}")]
    Model(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
