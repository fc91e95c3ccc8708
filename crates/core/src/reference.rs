//! Document references, locales and the page entries declared by packages.
//!
//! Textual form: `wiki:Space.Sub.Page;locale`. A `\` escapes `.`, `:`, `;`
//! and itself inside a segment.

use crate::namespace::WikiId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ESCAPED: [char; 4] = ['.', ':', ';', '\\'];

/// A page locale. The root locale is the empty string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }

    /// The root (language neutral) locale.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical form of an optional locale: absence is the root locale.
    pub fn normalize(locale: Option<&Locale>) -> Locale {
        locale.cloned().unwrap_or_default()
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("Locale(<root>)")
        } else {
            write!(f, "Locale({})", self.0)
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hierarchical location of a page inside a wiki (`Space.Sub.Page`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PagePath(Vec<String>);

impl PagePath {
    /// Create from already unescaped segments.
    pub fn new<I, S>(segments: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(crate::Error::InvalidReference(
                "page path cannot be empty".to_string(),
            ));
        }
        if segments.iter().any(String::is_empty) {
            return Err(crate::Error::InvalidReference(
                "page path segments cannot be empty".to_string(),
            ));
        }
        Ok(Self(segments))
    }

    /// Parse the dotted, escaped form.
    pub fn parse(path: &str) -> crate::Result<Self> {
        Self::new(split_unescaped(path, '.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Name of the page itself (last segment).
    pub fn name(&self) -> &str {
        // Never empty, see `new`.
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl TryFrom<String> for PagePath {
    type Error = crate::Error;

    fn try_from(path: String) -> crate::Result<Self> {
        Self::parse(&path)
    }
}

impl From<PagePath> for String {
    fn from(path: PagePath) -> Self {
        path.to_string()
    }
}

impl fmt::Debug for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PagePath({self})")
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write_escaped(f, segment)?;
        }
        Ok(())
    }
}

/// One page declared by a XAR package.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Location of the page.
    pub page: PagePath,
    /// Translation carried by the entry; `None` is the root locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

impl PackageEntry {
    pub fn new(page: PagePath, locale: Option<Locale>) -> Self {
        Self { page, locale }
    }

    /// Parse `Space.Page` with an optional `;locale` suffix.
    pub fn parse(entry: &str) -> crate::Result<Self> {
        let (page, locale) = split_locale(entry);
        Ok(Self::new(PagePath::parse(page)?, locale))
    }
}

/// Reference to one page of one wiki, optionally in a given locale.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DocumentReference {
    wiki: WikiId,
    page: PagePath,
    locale: Option<Locale>,
}

impl DocumentReference {
    pub fn new(wiki: WikiId, page: PagePath, locale: Option<Locale>) -> Self {
        Self { wiki, page, locale }
    }

    pub fn wiki(&self) -> &WikiId {
        &self.wiki
    }

    pub fn page(&self) -> &PagePath {
        &self.page
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Same reference with the given locale.
    pub fn with_locale(&self, locale: Option<Locale>) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }
}

impl FromStr for DocumentReference {
    type Err = crate::Error;

    /// Parse `wiki:Space.Page` with an optional `;locale` suffix.
    fn from_str(reference: &str) -> crate::Result<Self> {
        let colon = find_unescaped(reference, ':').ok_or_else(|| {
            crate::Error::InvalidReference(format!("missing wiki part in {reference}"))
        })?;
        let wiki = unescape(&reference[..colon]);
        if wiki.is_empty() {
            return Err(crate::Error::InvalidReference(format!(
                "wiki cannot be empty in {reference}"
            )));
        }

        let (page, locale) = split_locale(&reference[colon + 1..]);
        Ok(Self::new(WikiId::new(wiki), PagePath::parse(page)?, locale))
    }
}

impl fmt::Debug for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentReference({self})")
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, self.wiki.as_str())?;
        write!(f, ":{}", self.page)?;
        if let Some(locale) = &self.locale {
            f.write_str(";")?;
            write_escaped(f, locale.as_str())?;
        }
        Ok(())
    }
}

fn split_locale(s: &str) -> (&str, Option<Locale>) {
    match rfind_unescaped(s, ';') {
        Some(pos) => (&s[..pos], Some(Locale::new(unescape(&s[pos + 1..])))),
        None => (s, None),
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    for c in segment.chars() {
        if ESCAPED.contains(&c) {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

/// Byte positions of every unescaped `sep`.
fn unescaped_positions(s: &str, sep: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut escaping = false;
    for (pos, c) in s.char_indices() {
        if escaping {
            escaping = false;
        } else if c == '\\' {
            escaping = true;
        } else if c == sep {
            positions.push(pos);
        }
    }
    positions
}

fn find_unescaped(s: &str, sep: char) -> Option<usize> {
    unescaped_positions(s, sep).first().copied()
}

fn rfind_unescaped(s: &str, sep: char) -> Option<usize> {
    unescaped_positions(s, sep).last().copied()
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn split_unescaped(s: &str, sep: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut start = 0;
    for pos in unescaped_positions(s, sep) {
        segments.push(unescape(&s[start..pos]));
        start = pos + sep.len_utf8();
    }
    segments.push(unescape(&s[start..]));
    segments
}
