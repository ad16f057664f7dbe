use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// A number attribute held text that does not parse as a finite double.
    #[error("Malformed number attribute: {0:?}")]
    Format(String),

    #[error("Item is missing key attribute: {0}")]
    MissingKey(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
