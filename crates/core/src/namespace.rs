//! Installation namespaces and the index scopes derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace type identifying a wiki installation.
pub const WIKI_NAMESPACE_TYPE: &str = "wiki";

/// Identifier of one wiki in a multi-tenant farm.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WikiId(String);

impl WikiId {
    pub fn new(wiki: impl Into<String>) -> Self {
        Self(wiki.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WikiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WikiId({})", self.0)
    }
}

impl fmt::Display for WikiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Installation namespace as reported by the backing store (`type:value`).
///
/// A namespace without an unescaped `:` has no type. Only `wiki:` namespaces
/// can be mapped to an index scope.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Namespace {
    kind: Option<String>,
    value: String,
}

impl Namespace {
    /// Create from components.
    pub fn new(kind: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.map(str::to_string),
            value: value.into(),
        }
    }

    /// Namespace of a single wiki.
    pub fn wiki(wiki: &str) -> Self {
        Self::new(Some(WIKI_NAMESPACE_TYPE), wiki)
    }

    /// Parse the `type:value` form. `\` escapes characters of the type part.
    pub fn parse(namespace: &str) -> Self {
        let mut kind = String::new();
        let mut chars = namespace.char_indices();
        while let Some((pos, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        kind.push(escaped);
                    }
                }
                ':' => {
                    return Self {
                        kind: Some(kind),
                        value: namespace[pos + 1..].to_string(),
                    };
                }
                _ => kind.push(c),
            }
        }

        Self {
            kind: None,
            value: namespace.to_string(),
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Map to the wiki this namespace designates.
    pub fn to_wiki(&self) -> crate::Result<WikiId> {
        match self.kind() {
            Some(WIKI_NAMESPACE_TYPE) => Ok(WikiId::new(self.value.as_str())),
            _ => Err(crate::Error::UnsupportedNamespace(self.to_string())),
        }
    }
}

impl From<String> for Namespace {
    fn from(namespace: String) -> Self {
        Self::parse(&namespace)
    }
}

impl From<Namespace> for String {
    fn from(namespace: Namespace) -> Self {
        namespace.to_string()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({self})")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = &self.kind {
            for c in kind.chars() {
                if matches!(c, ':' | '\\') {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
            f.write_str(":")?;
        }
        f.write_str(&self.value)
    }
}

/// Which ownership index an installation lands in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IndexScope {
    /// Installed once for the whole farm.
    Root,
    /// Installed on one wiki.
    Wiki(WikiId),
}

impl IndexScope {
    /// Resolve a reported namespace; `None` means a root installation.
    pub fn from_namespace(namespace: Option<&Namespace>) -> crate::Result<Self> {
        match namespace {
            None => Ok(Self::Root),
            Some(namespace) => namespace.to_wiki().map(Self::Wiki),
        }
    }
}

impl fmt::Display for IndexScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::Wiki(wiki) => write!(f, "{WIKI_NAMESPACE_TYPE}:{wiki}"),
        }
    }
}
