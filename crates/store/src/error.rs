//! Backing store and archive reader error types.

use thiserror::Error;
use xarindex_core::ExtensionId;

/// Installed-extension store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to resolve extension: {0}")]
    Resolve(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Core(#[from] xarindex_core::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure to read the page entries of a package.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to parse package {extension}: {reason}")]
    Parse {
        extension: ExtensionId,
        reason: String,
    },

    #[error("package file missing for {0}")]
    Missing(ExtensionId),
}

/// Result type for archive reads.
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;
