//! Installed-extension store abstraction for the XAR repository.
//!
//! This crate provides:
//! - The generic installed-extension repository trait the XAR repository reads from
//! - The archive reader trait used to list the pages of a package
//! - In-memory implementations and a declarative snapshot format

pub mod error;
pub mod memory;
pub mod models;
pub mod repos;
pub mod snapshot;

pub use error::{ArchiveError, ArchiveResult, StoreError, StoreResult};
pub use memory::{MemoryStore, StaticArchiveReader};
pub use models::{InstalledExtension, RepositoryDescriptor};
pub use repos::{ArchiveReader, BackwardDependencies, InstalledExtensionRepo};
pub use snapshot::{Snapshot, SnapshotExtension};
