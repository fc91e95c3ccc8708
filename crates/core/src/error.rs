//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid document reference: {0}")]
    InvalidReference(String),

    #[error("invalid extension id: {0}")]
    InvalidExtensionId(String),

    #[error("unsupported namespace: {0}")]
    UnsupportedNamespace(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
