//! Error type shared by every fallible operation in the correction core.

#[derive(Debug, thiserror::Error)]
pub enum DaltonError {
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    #[error("invalid correction mode: {0:?}")]
    InvalidMode(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DaltonError>;
