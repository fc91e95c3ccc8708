//! Page ownership index.
//!
//! Two independent tables map a [`DocumentKey`] to the extensions owning that
//! page: one for extensions installed on a specific wiki and one for
//! extensions installed on root. Rows hold an `Arc<OwnerSet>` that is never
//! mutated once published; writers build a new set and swap it in, so a
//! reader always sees either the previous or the next set of a row.
//!
//! Writers of one table serialize on that table's mutex. Readers never take
//! it.

use crate::cache::CachedExtension;
use crate::key::DocumentKey;
use dashmap::DashMap;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, PoisonError};
use xarindex_core::{DocumentReference, ExtensionId, IndexScope, PackageEntry};

/// Owners of one page, in the order they were added.
pub type OwnerSet = IndexMap<ExtensionId, Arc<CachedExtension>>;

/// Number of rows in each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub wiki_documents: usize,
    pub root_documents: usize,
}

#[derive(Default)]
struct OwnershipTable {
    rows: DashMap<DocumentKey, Arc<OwnerSet>>,
    writer: Mutex<()>,
}

impl OwnershipTable {
    fn get(&self, key: &DocumentKey) -> Option<Arc<OwnerSet>> {
        self.rows.get(key).map(|row| Arc::clone(row.value()))
    }

    fn apply(
        &self,
        keys: impl Iterator<Item = DocumentKey>,
        extension: &Arc<CachedExtension>,
        add: bool,
    ) {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        for key in keys {
            let current = self.get(&key);
            if current.is_none() && !add {
                continue;
            }

            let mut owners = current.as_deref().cloned().unwrap_or_default();
            if add {
                owners.insert(extension.id().clone(), Arc::clone(extension));
            } else {
                owners.shift_remove(extension.id());
            }

            if owners.is_empty() {
                self.rows.remove(&key);
            } else {
                self.rows.insert(key, Arc::new(owners));
            }
        }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Per-wiki and root page → owners tables.
#[derive(Default)]
pub struct DocumentOwnershipIndex {
    wiki: OwnershipTable,
    root: OwnershipTable,
}

impl DocumentOwnershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `extension` to (or remove it from) the owners of every entry on `scope`.
    ///
    /// Removing from a page with no owners does not create a row.
    pub fn apply(
        &self,
        extension: &Arc<CachedExtension>,
        scope: &IndexScope,
        entries: &[PackageEntry],
        add: bool,
    ) {
        let keys = entries
            .iter()
            .map(|entry| DocumentKey::for_entry(entry, scope));
        let table = match scope {
            IndexScope::Root => &self.root,
            IndexScope::Wiki(_) => &self.wiki,
        };
        table.apply(keys, extension, add);

        tracing::debug!(
            extension = %extension.id(),
            scope = %scope,
            entries = entries.len(),
            add,
            "Ownership updated"
        );
    }

    /// Owners of `reference`: extensions installed on its wiki first, then root ones.
    pub fn lookup(&self, reference: &DocumentReference) -> Vec<Arc<CachedExtension>> {
        let wiki = self.wiki.get(&DocumentKey::wiki(reference));
        let root = self.root.get(&DocumentKey::root(reference));

        wiki.iter()
            .chain(root.iter())
            .flat_map(|owners| owners.values().cloned())
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            wiki_documents: self.wiki.len(),
            root_documents: self.root.len(),
        }
    }
}
