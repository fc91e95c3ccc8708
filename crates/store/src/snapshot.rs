//! Declarative description of installed extensions.
//!
//! A snapshot lists installed extensions together with the pages their
//! packages declare, and can be turned into a [`MemoryStore`] plus a
//! [`StaticArchiveReader`].
//!
//! ```toml
//! [[extensions]]
//! id = "org.example:help-pages"
//! version = "1.0"
//! type = "xar"
//! namespaces = ["wiki:demo"]
//! pages = ["Help.WebHome", "Help.WebHome;fr"]
//! ```

use crate::error::{StoreError, StoreResult};
use crate::memory::{MemoryStore, StaticArchiveReader};
use crate::models::InstalledExtension;
use serde::Deserialize;
use xarindex_core::{ExtensionId, ExtensionKind, Namespace, PackageEntry};

/// Parsed snapshot document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub extensions: Vec<SnapshotExtension>,
}

/// One installed extension of a snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotExtension {
    pub id: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: ExtensionKind,
    /// Omitted for a root installation.
    #[serde(default)]
    pub namespaces: Option<Vec<Namespace>>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Page entries (`Space.Page[;locale]`) declared by the package.
    #[serde(default)]
    pub pages: Vec<String>,
    /// Simulate an unreadable package.
    #[serde(default)]
    pub parse_error: Option<String>,
}

impl Snapshot {
    /// Parse a TOML snapshot.
    pub fn from_toml_str(source: &str) -> StoreResult<Self> {
        toml::from_str(source).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    /// Build the store and archive reader described by this snapshot.
    pub async fn build(&self) -> StoreResult<(MemoryStore, StaticArchiveReader)> {
        let store = match &self.uri {
            Some(uri) => MemoryStore::new(uri.as_str()),
            None => MemoryStore::default(),
        };
        let reader = StaticArchiveReader::new();

        for extension in &self.extensions {
            let id = ExtensionId::new(extension.id.as_str(), extension.version.as_str());

            match &extension.parse_error {
                Some(reason) => reader.set_broken(id.clone(), reason.as_str()),
                None => {
                    let entries = extension
                        .pages
                        .iter()
                        .map(|page| PackageEntry::parse(page))
                        .collect::<xarindex_core::Result<Vec<_>>>()?;
                    reader.set_entries(id.clone(), entries);
                }
            }

            store
                .install(InstalledExtension {
                    id,
                    kind: extension.kind.clone(),
                    namespaces: extension.namespaces.clone(),
                    dependencies: extension.dependencies.clone(),
                })
                .await;
        }

        Ok((store, reader))
    }
}
