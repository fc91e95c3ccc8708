//! Core domain types and shared logic for the XAR ownership index.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Extension identities and extension kinds
//! - Installation namespaces and index scopes
//! - Document references, locales and package entries
//! - Configuration shared by the repository and the CLI

pub mod config;
pub mod error;
pub mod extension;
pub mod namespace;
pub mod reference;

pub use error::{Error, Result};
pub use extension::{ExtensionId, ExtensionKind};
pub use namespace::{IndexScope, Namespace, WikiId};
pub use reference::{DocumentReference, Locale, PackageEntry, PagePath};

/// Extension type handled by the XAR repository.
pub const XAR_TYPE: &str = "xar";
