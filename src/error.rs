//! Error types for frames, managers and triple stores.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store has been released")]
    Released,

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Frame and manager API errors
#[derive(Debug, Error)]
pub enum FrameError {
    /// Malformed or missing identifiers, incompatible arguments.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The target is in a state that does not permit the operation
    /// (unknown frame, removed frame, registry already attached).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for FrameError {
    fn from(err: config::ConfigError) -> Self {
        FrameError::ConfigError(err.to_string())
    }
}
