use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File error: {0}")]
    File(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for WatchError {
    fn from(err: std::io::Error) -> Self {
        WatchError::File(err.to_string())
    }
}

impl From<serde_json::Error> for WatchError {
    fn from(err: serde_json::Error) -> Self {
        WatchError::Serialization(err.to_string())
    }
}
