//! Normalized keys of the ownership tables.

use xarindex_core::{DocumentReference, IndexScope, Locale, PackageEntry, PagePath, WikiId};

/// Normalized identity of one page in one of the ownership tables.
///
/// Root keys carry no wiki. The locale is always explicit: a missing locale
/// is stored as the root locale, so both spellings hit the same row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    wiki: Option<WikiId>,
    page: PagePath,
    locale: Locale,
}

impl DocumentKey {
    /// Key of a package entry installed on `scope`.
    pub fn for_entry(entry: &PackageEntry, scope: &IndexScope) -> Self {
        let wiki = match scope {
            IndexScope::Root => None,
            IndexScope::Wiki(wiki) => Some(wiki.clone()),
        };
        Self {
            wiki,
            page: entry.page.clone(),
            locale: Locale::normalize(entry.locale.as_ref()),
        }
    }

    /// Key of `reference` in the per-wiki table.
    pub fn wiki(reference: &DocumentReference) -> Self {
        Self {
            wiki: Some(reference.wiki().clone()),
            page: reference.page().clone(),
            locale: Locale::normalize(reference.locale()),
        }
    }

    /// Key of `reference` in the root table.
    pub fn root(reference: &DocumentReference) -> Self {
        Self {
            wiki: None,
            page: reference.page().clone(),
            locale: Locale::normalize(reference.locale()),
        }
    }
}
