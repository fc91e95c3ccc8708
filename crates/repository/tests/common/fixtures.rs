use std::sync::Arc;
use xarindex_core::config::RepositoryConfig;
use xarindex_core::{DocumentReference, ExtensionId, ExtensionKind, Namespace, PackageEntry};
use xarindex_repository::{CachedExtension, XarInstalledRepository};
use xarindex_store::{InstalledExtension, MemoryStore, StaticArchiveReader};

/// Repository wired to an in-memory store and archive reader.
#[allow(dead_code)]
pub struct TestRepository {
    pub store: Arc<MemoryStore>,
    pub reader: Arc<StaticArchiveReader>,
    pub repository: Arc<XarInstalledRepository>,
}

#[allow(dead_code)]
impl TestRepository {
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    pub fn with_config(config: RepositoryConfig) -> Self {
        let store = Arc::new(MemoryStore::new("memory:test"));
        let reader = Arc::new(StaticArchiveReader::new());
        let repository = Arc::new(XarInstalledRepository::new(
            store.clone(),
            reader.clone(),
            config,
        ));
        Self {
            store,
            reader,
            repository,
        }
    }

    /// Record a XAR extension with its pages. `None` namespaces installs on root.
    pub async fn install_xar(
        &self,
        name: &str,
        namespaces: Option<&[&str]>,
        pages: &[&str],
    ) -> ExtensionId {
        let id = ext_id(name);
        self.reader.set_entries(id.clone(), entries(pages));
        self.store.install(record(&id, ExtensionKind::Xar, namespaces)).await;
        id
    }

    /// Record a XAR extension whose package cannot be read.
    pub async fn install_broken_xar(&self, name: &str, namespaces: Option<&[&str]>) -> ExtensionId {
        let id = ext_id(name);
        self.reader.set_broken(id.clone(), "corrupted archive");
        self.store.install(record(&id, ExtensionKind::Xar, namespaces)).await;
        id
    }

    /// Record an extension of another type.
    pub async fn install_other(&self, name: &str, kind: ExtensionKind) -> ExtensionId {
        let id = ext_id(name);
        self.store.install(record(&id, kind, None)).await;
        id
    }
}

fn record(id: &ExtensionId, kind: ExtensionKind, namespaces: Option<&[&str]>) -> InstalledExtension {
    match namespaces {
        None => InstalledExtension::root(id.clone(), kind),
        Some(namespaces) => InstalledExtension::on_namespaces(
            id.clone(),
            kind,
            namespaces.iter().map(|ns| Namespace::parse(ns)),
        ),
    }
}

pub fn ext_id(name: &str) -> ExtensionId {
    ExtensionId::new(format!("org.example:{name}"), "1.0")
}

pub fn entries(pages: &[&str]) -> Vec<PackageEntry> {
    pages
        .iter()
        .map(|page| PackageEntry::parse(page).unwrap())
        .collect()
}

pub fn doc(reference: &str) -> DocumentReference {
    reference.parse().unwrap()
}

pub fn wiki(name: &str) -> Namespace {
    Namespace::wiki(name)
}

/// Short names (`org.example:` stripped) of the owners, in order.
pub fn owner_ids(owners: &[Arc<CachedExtension>]) -> Vec<String> {
    owners
        .iter()
        .map(|owner| {
            owner
                .id()
                .id()
                .trim_start_matches("org.example:")
                .to_string()
        })
        .collect()
}
