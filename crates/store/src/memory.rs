//! In-memory implementations of the store traits.

use crate::error::{ArchiveError, ArchiveResult, StoreError, StoreResult};
use crate::models::{InstalledExtension, RepositoryDescriptor};
use crate::repos::{ArchiveReader, BackwardDependencies, InstalledExtensionRepo};
use async_trait::async_trait;
use dashmap::DashMap;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use xarindex_core::{ExtensionId, Namespace, PackageEntry};

/// Installed-extension store kept in memory, in installation order.
pub struct MemoryStore {
    uri: String,
    extensions: RwLock<IndexMap<ExtensionId, InstalledExtension>>,
}

impl MemoryStore {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            extensions: RwLock::new(IndexMap::new()),
        }
    }

    /// Record an installation, replacing any previous record with the same identity.
    pub async fn install(&self, extension: InstalledExtension) {
        tracing::debug!(extension = %extension.id, kind = %extension.kind, "Extension recorded");
        self.extensions
            .write()
            .await
            .insert(extension.id.clone(), extension);
    }

    /// Forget an installation. Returns the removed record.
    pub async fn uninstall(&self, extension_id: &ExtensionId) -> Option<InstalledExtension> {
        let removed = self.extensions.write().await.shift_remove(extension_id);
        if removed.is_some() {
            tracing::debug!(extension = %extension_id, "Extension removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.extensions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.extensions.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("memory:installed")
    }
}

#[async_trait]
impl InstalledExtensionRepo for MemoryStore {
    fn descriptor(&self) -> RepositoryDescriptor {
        RepositoryDescriptor {
            id: "installed".to_string(),
            kind: "installed".to_string(),
            uri: self.uri.clone(),
        }
    }

    async fn installed_extensions(&self) -> StoreResult<Vec<InstalledExtension>> {
        Ok(self.extensions.read().await.values().cloned().collect())
    }

    async fn find_installed_extension(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> StoreResult<Option<InstalledExtension>> {
        Ok(self
            .extensions
            .read()
            .await
            .values()
            .find(|extension| extension.id.id() == id && extension.is_installed(namespace))
            .cloned())
    }

    async fn get_installed_extension(
        &self,
        extension_id: &ExtensionId,
    ) -> StoreResult<Option<InstalledExtension>> {
        Ok(self.extensions.read().await.get(extension_id).cloned())
    }

    async fn resolve(&self, extension_id: &ExtensionId) -> StoreResult<InstalledExtension> {
        self.get_installed_extension(extension_id)
            .await?
            .ok_or_else(|| StoreError::Resolve(format!("{extension_id} is not installed")))
    }

    async fn backward_dependencies(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> StoreResult<Vec<InstalledExtension>> {
        Ok(self
            .extensions
            .read()
            .await
            .values()
            .filter(|extension| extension.depends_on(id) && extension.is_installed(namespace))
            .cloned()
            .collect())
    }

    async fn backward_dependencies_by_namespace(
        &self,
        extension_id: &ExtensionId,
    ) -> StoreResult<BackwardDependencies> {
        let target = self.resolve(extension_id).await?;
        let namespaces: Vec<Option<Namespace>> = match &target.namespaces {
            None => vec![None],
            Some(namespaces) => namespaces.iter().cloned().map(Some).collect(),
        };

        let mut result = BackwardDependencies::new();
        for namespace in namespaces {
            let dependents = self
                .backward_dependencies(extension_id.id(), namespace.as_ref())
                .await?;
            if !dependents.is_empty() {
                result.insert(namespace, dependents);
            }
        }
        Ok(result)
    }
}

/// Archive reader serving pre-declared page entries.
///
/// Extensions without declared entries, or explicitly marked broken, fail to parse.
#[derive(Default)]
pub struct StaticArchiveReader {
    packages: DashMap<ExtensionId, Result<Vec<PackageEntry>, String>>,
    reads: AtomicUsize,
}

impl StaticArchiveReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the entries of a package.
    pub fn set_entries(&self, extension_id: ExtensionId, entries: Vec<PackageEntry>) {
        self.packages.insert(extension_id, Ok(entries));
    }

    /// Make the package fail to parse with the given reason.
    pub fn set_broken(&self, extension_id: ExtensionId, reason: impl Into<String>) {
        self.packages.insert(extension_id, Err(reason.into()));
    }

    /// Number of packages read so far, successful or not.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ArchiveReader for StaticArchiveReader {
    async fn read_entries(
        &self,
        extension: &InstalledExtension,
    ) -> ArchiveResult<Vec<PackageEntry>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        match self.packages.get(&extension.id) {
            Some(package) => package.value().clone().map_err(|reason| ArchiveError::Parse {
                extension: extension.id.clone(),
                reason,
            }),
            None => Err(ArchiveError::Missing(extension.id.clone())),
        }
    }
}
