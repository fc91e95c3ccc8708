//! Cache of parsed XAR extensions.

use crate::error::RepositoryResult;
use dashmap::DashMap;
use std::sync::Arc;
use xarindex_core::{ExtensionId, Namespace, PackageEntry};
use xarindex_store::{ArchiveReader, InstalledExtension};

/// Immutable snapshot of an installed XAR extension and the pages it declares.
///
/// Re-caching replaces the whole value; nothing is mutated in place.
#[derive(Debug)]
pub struct CachedExtension {
    installed: InstalledExtension,
    entries: Vec<PackageEntry>,
}

impl CachedExtension {
    pub fn new(installed: InstalledExtension, entries: Vec<PackageEntry>) -> Self {
        Self { installed, entries }
    }

    pub fn id(&self) -> &ExtensionId {
        &self.installed.id
    }

    /// Namespaces reported at caching time; `None` for a root installation.
    pub fn namespaces(&self) -> Option<&[Namespace]> {
        self.installed.namespaces.as_deref()
    }

    /// Page entries, in package order.
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Backing store record this snapshot was built from.
    pub fn installed(&self) -> &InstalledExtension {
        &self.installed
    }
}

/// Map of extension identity to its parsed snapshot.
pub struct ExtensionCache {
    reader: Arc<dyn ArchiveReader>,
    extensions: DashMap<ExtensionId, Arc<CachedExtension>>,
}

impl ExtensionCache {
    pub fn new(reader: Arc<dyn ArchiveReader>) -> Self {
        Self {
            reader,
            extensions: DashMap::new(),
        }
    }

    pub fn lookup(&self, extension_id: &ExtensionId) -> Option<Arc<CachedExtension>> {
        self.extensions
            .get(extension_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached snapshot, reading the package when it is not cached yet.
    ///
    /// A read failure leaves the cache untouched.
    pub async fn get_or_load(
        &self,
        installed: &InstalledExtension,
    ) -> RepositoryResult<Arc<CachedExtension>> {
        if let Some(cached) = self.lookup(&installed.id) {
            return Ok(cached);
        }

        let entries = self.reader.read_entries(installed).await?;
        let cached = Arc::new(CachedExtension::new(installed.clone(), entries));

        // A concurrent load of the same extension may have won; keep the first one.
        let cached = self
            .extensions
            .entry(installed.id.clone())
            .or_insert(cached)
            .value()
            .clone();

        tracing::debug!(
            extension = %installed.id,
            entries = cached.entries().len(),
            "Extension cached"
        );
        Ok(cached)
    }

    /// Drop the snapshot of an extension. Returns it if it was cached.
    pub fn evict(&self, extension_id: &ExtensionId) -> Option<Arc<CachedExtension>> {
        self.extensions
            .remove(extension_id)
            .map(|(_, extension)| extension)
    }

    /// Snapshot of every cached extension.
    pub fn extensions(&self) -> Vec<Arc<CachedExtension>> {
        self.extensions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}
