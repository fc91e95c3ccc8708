//! Generic installed-extension repository.

use crate::error::StoreResult;
use crate::models::{InstalledExtension, RepositoryDescriptor};
use async_trait::async_trait;
use std::collections::HashMap;
use xarindex_core::{ExtensionId, Namespace};

/// Backward dependencies grouped by namespace (`None` is root).
pub type BackwardDependencies = HashMap<Option<Namespace>, Vec<InstalledExtension>>;

/// Repository of every installed extension, whatever its type.
#[async_trait]
pub trait InstalledExtensionRepo: Send + Sync {
    /// Describe this repository.
    fn descriptor(&self) -> RepositoryDescriptor;

    /// List every installed extension.
    async fn installed_extensions(&self) -> StoreResult<Vec<InstalledExtension>>;

    /// Get the extension with the given id installed on a namespace (`None` is root).
    async fn find_installed_extension(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> StoreResult<Option<InstalledExtension>>;

    /// Get an installed extension by its exact identity.
    async fn get_installed_extension(
        &self,
        extension_id: &ExtensionId,
    ) -> StoreResult<Option<InstalledExtension>>;

    /// Resolve an installed extension by its exact identity, failing when absent.
    async fn resolve(&self, extension_id: &ExtensionId) -> StoreResult<InstalledExtension>;

    /// Extensions installed on `namespace` that depend on `id`.
    async fn backward_dependencies(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> StoreResult<Vec<InstalledExtension>>;

    /// Extensions depending on `extension_id`, for each namespace it is installed on.
    async fn backward_dependencies_by_namespace(
        &self,
        extension_id: &ExtensionId,
    ) -> StoreResult<BackwardDependencies>;
}
