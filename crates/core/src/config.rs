//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the repository reacts when it first observes a newly installed extension.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReconcilePolicy {
    /// Only cache the extension; ownership rows arrive with page events.
    #[default]
    Lazy,
    /// Cache the extension and index its pages on every declared namespace,
    /// like the initial load does.
    Eager,
}

/// XAR repository configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Indexing policy for extensions observed after startup.
    #[serde(default)]
    pub reconcile_policy: ReconcilePolicy,
    /// Capacity of the notification queue feeding the event listener.
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
}

fn default_event_queue_capacity() -> usize {
    1024
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            reconcile_policy: ReconcilePolicy::default(),
            event_queue_capacity: default_event_queue_capacity(),
        }
    }
}

impl RepositoryConfig {
    /// Validate repository configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.event_queue_capacity == 0 {
            return Err("event_queue_capacity must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Location of the installed-extension snapshot loaded by the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot file (TOML).
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./installed.toml")
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Repository configuration.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Snapshot source configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    /// Validate every section.
    pub fn validate(&self) -> crate::Result<()> {
        self.repository.validate().map_err(crate::Error::Config)
    }
}
