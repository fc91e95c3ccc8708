//! Extension identities and kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of an installed extension: a name plus a version.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExtensionId {
    id: String,
    version: String,
}

impl ExtensionId {
    /// Create from components.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }

    /// Get the extension name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the extension version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl FromStr for ExtensionId {
    type Err = crate::Error;

    /// Parse the `name/version` form produced by `Display`.
    fn from_str(s: &str) -> crate::Result<Self> {
        let (id, version) = s.rsplit_once('/').ok_or_else(|| {
            crate::Error::InvalidExtensionId(format!("expected <id>/<version>, got {s}"))
        })?;
        if id.is_empty() || version.is_empty() {
            return Err(crate::Error::InvalidExtensionId(format!(
                "id and version cannot be empty: {s}"
            )));
        }
        Ok(Self::new(id, version))
    }
}

impl fmt::Debug for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtensionId({self})")
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.version)
    }
}

/// Declared type of an installed extension.
///
/// The backing store is generic over extension types; the XAR repository only
/// reflects extensions for which [`ExtensionKind::is_xar`] holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtensionKind {
    /// Wiki page archive.
    Xar,
    /// Java archive.
    Jar,
    /// Web JAR (static resources).
    Webjar,
    /// Any other declared type, kept verbatim.
    Other(String),
}

impl ExtensionKind {
    /// Whether this is the kind handled by the XAR repository.
    pub fn is_xar(&self) -> bool {
        matches!(self, Self::Xar)
    }

    /// Get the declared type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Xar => crate::XAR_TYPE,
            Self::Jar => "jar",
            Self::Webjar => "webjar",
            Self::Other(kind) => kind,
        }
    }
}

impl From<&str> for ExtensionKind {
    fn from(kind: &str) -> Self {
        // Type strings are compared case-insensitively.
        match kind.to_ascii_lowercase().as_str() {
            crate::XAR_TYPE => Self::Xar,
            "jar" => Self::Jar,
            "webjar" => Self::Webjar,
            _ => Self::Other(kind.to_string()),
        }
    }
}

impl From<String> for ExtensionKind {
    fn from(kind: String) -> Self {
        Self::from(kind.as_str())
    }
}

impl From<ExtensionKind> for String {
    fn from(kind: ExtensionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
