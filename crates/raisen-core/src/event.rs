//! Event bus for raisen using tokio::broadcast
//!
//! Consumers subscribe and recompute their views when a collection changes.

use tokio::sync::broadcast;

/// Events emitted by the dashboard store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEvent {
    /// Client list replaced
    ClientsUpdated,
    /// Social account list replaced
    AccountsUpdated,
    /// Post list replaced
    PostsUpdated,
    /// AI configuration of one client changed
    AiConfigUpdated(String),
    /// Initial load completed
    LoadCompleted,
}

/// Event bus for broadcasting data events
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DataEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (64 events)
    pub fn default_capacity() -> Self {
        Self::new(64)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: DataEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}
