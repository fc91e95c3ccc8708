//! Traits for the collaborators the XAR repository reads from.

pub mod archive;
pub mod installed;

pub use archive::ArchiveReader;
pub use installed::{BackwardDependencies, InstalledExtensionRepo};
