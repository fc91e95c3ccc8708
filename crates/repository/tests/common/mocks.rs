use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use xarindex_core::{ExtensionId, Namespace};
use xarindex_store::{
    BackwardDependencies, InstalledExtension, InstalledExtensionRepo, MemoryStore,
    RepositoryDescriptor, StoreError, StoreResult,
};

/// Store delegating to a [`MemoryStore`] that can be switched into failing mode.
#[allow(dead_code)]
pub struct FailingStore {
    pub inner: MemoryStore,
    failing: AtomicBool,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::default(),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InstalledExtensionRepo for FailingStore {
    fn descriptor(&self) -> RepositoryDescriptor {
        self.inner.descriptor()
    }

    async fn installed_extensions(&self) -> StoreResult<Vec<InstalledExtension>> {
        self.check()?;
        self.inner.installed_extensions().await
    }

    async fn find_installed_extension(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> StoreResult<Option<InstalledExtension>> {
        self.check()?;
        self.inner.find_installed_extension(id, namespace).await
    }

    async fn get_installed_extension(
        &self,
        extension_id: &ExtensionId,
    ) -> StoreResult<Option<InstalledExtension>> {
        self.check()?;
        self.inner.get_installed_extension(extension_id).await
    }

    async fn resolve(&self, extension_id: &ExtensionId) -> StoreResult<InstalledExtension> {
        self.check()?;
        self.inner.resolve(extension_id).await
    }

    async fn backward_dependencies(
        &self,
        id: &str,
        namespace: Option<&Namespace>,
    ) -> StoreResult<Vec<InstalledExtension>> {
        self.check()?;
        self.inner.backward_dependencies(id, namespace).await
    }

    async fn backward_dependencies_by_namespace(
        &self,
        extension_id: &ExtensionId,
    ) -> StoreResult<BackwardDependencies> {
        self.check()?;
        self.inner
            .backward_dependencies_by_namespace(extension_id)
            .await
    }
}
