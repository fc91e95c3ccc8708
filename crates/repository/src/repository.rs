//! Read-only XAR view over the generic installed-extension store.

use crate::cache::{CachedExtension, ExtensionCache};
use crate::error::{RepositoryError, RepositoryResult};
use crate::events::RepositoryEvent;
use crate::ownership::{DocumentOwnershipIndex, IndexStats};
use std::sync::Arc;
use xarindex_core::config::{ReconcilePolicy, RepositoryConfig};
use xarindex_core::{DocumentReference, ExtensionId, IndexScope, Namespace, XAR_TYPE};
use xarindex_store::{
    ArchiveReader, BackwardDependencies, InstalledExtension, InstalledExtensionRepo,
    RepositoryDescriptor,
};

/// Result of the initial load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Extensions cached and indexed.
    pub cached: usize,
    /// XAR extensions whose package could not be read.
    pub failed: Vec<ExtensionId>,
}

/// What a lifecycle notification did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Newly cached.
    Cached,
    /// Already cached; nothing to do.
    Unchanged,
    /// Removed from the cache.
    Evicted,
    /// Neither installed as XAR nor cached.
    Ignored,
    /// The package could not be read; the extension stays uncached.
    Failed,
}

/// Repository of installed XAR extensions and the pages they own.
///
/// Install and uninstall happen through the generic store; this repository
/// only mirrors them, driven by [`XarInstalledRepository::on_extension_changed`]
/// and [`XarInstalledRepository::on_pages_changed`].
pub struct XarInstalledRepository {
    installed: Arc<dyn InstalledExtensionRepo>,
    cache: ExtensionCache,
    index: DocumentOwnershipIndex,
    config: RepositoryConfig,
}

impl XarInstalledRepository {
    pub fn new(
        installed: Arc<dyn InstalledExtensionRepo>,
        reader: Arc<dyn ArchiveReader>,
        config: RepositoryConfig,
    ) -> Self {
        Self {
            installed,
            cache: ExtensionCache::new(reader),
            index: DocumentOwnershipIndex::new(),
            config,
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn descriptor(&self) -> RepositoryDescriptor {
        RepositoryDescriptor {
            id: XAR_TYPE.to_string(),
            kind: XAR_TYPE.to_string(),
            uri: self.installed.descriptor().uri,
        }
    }

    /// Cache every installed XAR extension and index its pages.
    ///
    /// Must complete before the repository serves queries. A package that
    /// cannot be read is logged and skipped.
    pub async fn initialize(&self) -> RepositoryResult<LoadReport> {
        let mut report = LoadReport::default();

        for installed in self.installed.installed_extensions().await? {
            if !installed.kind.is_xar() {
                continue;
            }

            match self.cache.get_or_load(&installed).await {
                Ok(extension) => {
                    self.index_installed_namespaces(&extension);
                    report.cached += 1;
                }
                Err(e) => {
                    tracing::error!(extension = %installed.id, error = %e, "Failed to parse extension");
                    report.failed.push(installed.id);
                }
            }
        }

        let stats = self.index.stats();
        tracing::info!(
            cached = report.cached,
            failed = report.failed.len(),
            wiki_documents = stats.wiki_documents,
            root_documents = stats.root_documents,
            "XAR repository initialized"
        );
        Ok(report)
    }

    fn index_installed_namespaces(&self, extension: &Arc<CachedExtension>) {
        match extension.namespaces() {
            None => self
                .index
                .apply(extension, &IndexScope::Root, extension.entries(), true),
            Some(namespaces) => {
                for namespace in namespaces {
                    match IndexScope::from_namespace(Some(namespace)) {
                        Ok(scope) => self.index.apply(extension, &scope, extension.entries(), true),
                        Err(e) => tracing::warn!(
                            extension = %extension.id(),
                            namespace = %namespace,
                            error = %e,
                            "Skipping pages of unsupported namespace"
                        ),
                    }
                }
            }
        }
    }

    /// Reconcile the cache with the store after the record of `extension_id` changed.
    ///
    /// Ownership rows are left to page notifications unless the eager policy is configured.
    pub async fn on_extension_changed(
        &self,
        extension_id: &ExtensionId,
    ) -> RepositoryResult<ReconcileOutcome> {
        let installed = self
            .installed
            .get_installed_extension(extension_id)
            .await?
            .filter(|installed| installed.kind.is_xar());

        let Some(installed) = installed else {
            return Ok(match self.cache.evict(extension_id) {
                Some(_) => {
                    tracing::info!(extension = %extension_id, "Extension evicted");
                    ReconcileOutcome::Evicted
                }
                None => ReconcileOutcome::Ignored,
            });
        };

        if self.cache.lookup(extension_id).is_some() {
            return Ok(ReconcileOutcome::Unchanged);
        }

        match self.cache.get_or_load(&installed).await {
            Ok(extension) => {
                tracing::info!(extension = %extension_id, "Extension cached");
                if self.config.reconcile_policy == ReconcilePolicy::Eager {
                    self.index_installed_namespaces(&extension);
                }
                Ok(ReconcileOutcome::Cached)
            }
            Err(e) => {
                tracing::error!(extension = %extension_id, error = %e, "Failed to parse extension");
                Ok(ReconcileOutcome::Failed)
            }
        }
    }

    /// Add or remove the pages of a cached extension on `namespace` (`None` is root).
    ///
    /// Uncached extensions are ignored.
    pub fn on_pages_changed(
        &self,
        extension_id: &ExtensionId,
        namespace: Option<&Namespace>,
        added: bool,
    ) -> RepositoryResult<()> {
        let Some(extension) = self.cache.lookup(extension_id) else {
            tracing::debug!(extension = %extension_id, "Page change for uncached extension ignored");
            return Ok(());
        };

        let scope = IndexScope::from_namespace(namespace)
            .map_err(|_| RepositoryError::UnsupportedNamespace(format_namespace(namespace)))?;
        self.index
            .apply(&extension, &scope, extension.entries(), added);
        Ok(())
    }

    pub fn pages_added(
        &self,
        extension_id: &ExtensionId,
        namespace: Option<&Namespace>,
    ) -> RepositoryResult<()> {
        self.on_pages_changed(extension_id, namespace, true)
    }

    pub fn pages_removed(
        &self,
        extension_id: &ExtensionId,
        namespace: Option<&Namespace>,
    ) -> RepositoryResult<()> {
        self.on_pages_changed(extension_id, namespace, false)
    }

    /// Dispatch one store notification.
    pub async fn handle_event(&self, event: &RepositoryEvent) -> RepositoryResult<()> {
        match event {
            RepositoryEvent::ExtensionChanged(extension_id) => {
                self.on_extension_changed(extension_id).await?;
                Ok(())
            }
            RepositoryEvent::PagesAdded {
                extension,
                namespace,
            } => self.pages_added(extension, namespace.as_ref()),
            RepositoryEvent::PagesRemoved {
                extension,
                namespace,
            } => self.pages_removed(extension, namespace.as_ref()),
        }
    }

    /// Extensions owning `reference`: wiki installations first, then root ones.
    pub fn lookup_owners(&self, reference: &DocumentReference) -> Vec<Arc<CachedExtension>> {
        self.index.lookup(reference)
    }

    /// The cached XAR extension with id `id` installed on `namespace`.
    ///
    /// Extensions of another type, and XAR extensions that failed to parse,
    /// are reported as not found.
    pub async fn get_installed_extension(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> RepositoryResult<Option<Arc<CachedExtension>>> {
        let installed = self.installed.find_installed_extension(id, namespace).await?;
        Ok(installed
            .filter(|installed| installed.kind.is_xar())
            .and_then(|installed| self.cache.lookup(&installed.id)))
    }

    /// The cached extension with this exact identity.
    pub fn get_cached_extension(&self, extension_id: &ExtensionId) -> Option<Arc<CachedExtension>> {
        self.cache.lookup(extension_id)
    }

    pub fn cached_extensions(&self) -> Vec<Arc<CachedExtension>> {
        self.cache.extensions()
    }

    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn install_extension(
        &self,
        _extension: &InstalledExtension,
        _namespace: Option<&Namespace>,
    ) -> RepositoryResult<Arc<CachedExtension>> {
        Err(RepositoryError::UnsupportedOperation("install_extension"))
    }

    pub fn uninstall_extension(
        &self,
        _extension: &ExtensionId,
        _namespace: Option<&Namespace>,
    ) -> RepositoryResult<()> {
        Err(RepositoryError::UnsupportedOperation("uninstall_extension"))
    }

    /// Extensions on `namespace` depending on `id`, when `id` is a XAR extension.
    ///
    /// `None` when the target is not installed as XAR.
    pub async fn get_backward_dependencies(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> RepositoryResult<Option<Vec<InstalledExtension>>> {
        match self.installed.find_installed_extension(id, namespace).await? {
            Some(target) if target.kind.is_xar() => Ok(Some(
                self.installed.backward_dependencies(id, namespace).await?,
            )),
            _ => Ok(None),
        }
    }

    /// Extensions depending on `extension_id` per namespace, when it is a XAR extension.
    ///
    /// Fails with the store's resolve error when `extension_id` is not installed.
    pub async fn get_backward_dependencies_by_id(
        &self,
        extension_id: &ExtensionId,
    ) -> RepositoryResult<Option<BackwardDependencies>> {
        let target = self.installed.resolve(extension_id).await?;
        if !target.kind.is_xar() {
            return Ok(None);
        }
        Ok(Some(
            self.installed
                .backward_dependencies_by_namespace(extension_id)
                .await?,
        ))
    }
}

fn format_namespace(namespace: Option<&Namespace>) -> String {
    namespace.map_or_else(|| "<root>".to_string(), Namespace::to_string)
}
