use tokio::sync::broadcast;

use crate::dto::sse::ServerEvent;

/// Fan-out point for board events; every SSE connection holds one receiver.
pub struct EventHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventHub {
    /// Create a hub whose slow subscribers start lagging after `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Publish to the current subscribers; nobody listening is not an error.
    pub fn publish(&self, event: ServerEvent) {
        let _ = self.sender.send(event);
    }

    /// Number of connected listeners.
    pub fn listeners(&self) -> usize {
        self.sender.receiver_count()
    }
}
