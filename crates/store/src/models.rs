//! Records exchanged with the backing installed-extension store.

use serde::{Deserialize, Serialize};
use xarindex_core::{ExtensionId, ExtensionKind, Namespace};

/// Installed extension record as reported by the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledExtension {
    pub id: ExtensionId,
    pub kind: ExtensionKind,
    /// Namespaces the extension is installed on; `None` means installed on root.
    pub namespaces: Option<Vec<Namespace>>,
    /// Ids (without version) of the extensions this one depends on.
    pub dependencies: Vec<String>,
}

impl InstalledExtension {
    /// Record installed on root.
    pub fn root(id: ExtensionId, kind: ExtensionKind) -> Self {
        Self {
            id,
            kind,
            namespaces: None,
            dependencies: Vec::new(),
        }
    }

    /// Record installed on the given namespaces.
    pub fn on_namespaces(
        id: ExtensionId,
        kind: ExtensionKind,
        namespaces: impl IntoIterator<Item = Namespace>,
    ) -> Self {
        Self {
            id,
            kind,
            namespaces: Some(namespaces.into_iter().collect()),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the extension is usable from `namespace`.
    ///
    /// A root installation is visible from every namespace; `None` asks for a
    /// root installation specifically.
    pub fn is_installed(&self, namespace: Option<&Namespace>) -> bool {
        match (&self.namespaces, namespace) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(namespaces), Some(namespace)) => namespaces.contains(namespace),
        }
    }

    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|dependency| dependency == id)
    }
}

/// Descriptor of an extension repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}
