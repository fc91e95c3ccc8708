//! Package archive reader.

use crate::error::ArchiveResult;
use crate::models::InstalledExtension;
use async_trait::async_trait;
use xarindex_core::PackageEntry;

/// Reads the page entries declared by an installed XAR package.
#[async_trait]
pub trait ArchiveReader: Send + Sync {
    /// Ordered page entries of the package, or a parse failure.
    async fn read_entries(&self, extension: &InstalledExtension)
    -> ArchiveResult<Vec<PackageEntry>>;
}
