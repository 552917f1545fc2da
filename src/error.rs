//! Error handling for the chunk ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("Cannot process empty resume: {0}")]
    EmptyInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, RankerError>;

impl RankerError {
    /// True for errors caused by the caller's input rather than by configuration or I/O.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, RankerError::EmptyInput(_) | RankerError::InvalidInput(_))
    }
}

impl From<toml::de::Error> for RankerError {
    fn from(err: toml::de::Error) -> Self {
        RankerError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for RankerError {
    fn from(err: toml::ser::Error) -> Self {
        RankerError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
