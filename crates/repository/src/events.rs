//! Delivery of installed-extension notifications into the repository.

use crate::repository::XarInstalledRepository;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use xarindex_core::{ExtensionId, Namespace};

/// Notification emitted by the generic store around installs and uninstalls.
///
/// For one extension the producer sends the lifecycle change before the
/// pages it adds, and removes pages before the uninstall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryEvent {
    /// The store record of an extension changed.
    ExtensionChanged(ExtensionId),
    /// Pages of an extension were installed on a namespace (`None` is root).
    PagesAdded {
        extension: ExtensionId,
        namespace: Option<Namespace>,
    },
    /// Pages of an extension were removed from a namespace (`None` is root).
    PagesRemoved {
        extension: ExtensionId,
        namespace: Option<Namespace>,
    },
}

impl RepositoryEvent {
    pub fn extension(&self) -> &ExtensionId {
        match self {
            Self::ExtensionChanged(extension)
            | Self::PagesAdded { extension, .. }
            | Self::PagesRemoved { extension, .. } => extension,
        }
    }
}

/// Applies notifications to the repository in the order they were sent.
pub struct EventListener {
    repository: Arc<XarInstalledRepository>,
    receiver: mpsc::Receiver<RepositoryEvent>,
}

impl EventListener {
    /// Create a listener and the sender feeding it. The queue capacity comes
    /// from the repository configuration.
    pub fn new(repository: Arc<XarInstalledRepository>) -> (mpsc::Sender<RepositoryEvent>, Self) {
        let (sender, receiver) = mpsc::channel(repository.config().event_queue_capacity.max(1));
        (
            sender,
            Self {
                repository,
                receiver,
            },
        )
    }

    /// Process notifications until every sender is dropped.
    ///
    /// A failing notification is logged and does not stop the listener.
    /// Returns the number of notifications processed.
    pub async fn run(mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.receiver.recv().await {
            if let Err(e) = self.repository.handle_event(&event).await {
                tracing::warn!(
                    extension = %event.extension(),
                    event = ?event,
                    error = %e,
                    "Failed to apply extension event"
                );
            }
            processed += 1;
        }
        tracing::debug!(processed, "Event listener stopped");
        processed
    }

    /// Run the listener on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(self.run())
    }
}
