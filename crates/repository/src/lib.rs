//! Ownership index of wiki pages installed by XAR extensions.
//!
//! This crate mirrors the XAR extensions recorded in a generic
//! installed-extension store and answers, for any page, which of them own it:
//! - [`ExtensionCache`]: parsed, immutable snapshots of installed XAR extensions
//! - [`DocumentOwnershipIndex`]: per-wiki and root page → owners tables
//! - [`XarInstalledRepository`]: initialization, event reconciliation and queries
//! - [`EventListener`]: ordered delivery of store notifications into the repository

pub mod cache;
pub mod error;
pub mod events;
pub mod key;
pub mod ownership;
pub mod repository;

pub use cache::{CachedExtension, ExtensionCache};
pub use error::{RepositoryError, RepositoryResult};
pub use events::{EventListener, RepositoryEvent};
pub use key::DocumentKey;
pub use ownership::{DocumentOwnershipIndex, IndexStats, OwnerSet};
pub use repository::{LoadReport, ReconcileOutcome, XarInstalledRepository};
