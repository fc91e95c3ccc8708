//! XAR repository error types.

use thiserror::Error;
use xarindex_store::{ArchiveError, StoreError};

/// XAR repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    PackageParse(#[from] ArchiveError),

    #[error("unsupported namespace: {0}")]
    UnsupportedNamespace(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
