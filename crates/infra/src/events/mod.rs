//! Domain event fan-out over a tokio broadcast channel

use async_trait::async_trait;
use finswitch_core::EventNotifier;
use finswitch_domain::{DomainEvent, Result};
use tokio::sync::broadcast;
use tracing::{debug, warn};

pub const DEFAULT_CAPACITY: usize = 256;

/// Publishes every dispatched event to all current subscribers.
///
/// Dispatch never fails: with no subscribers the event is dropped and a
/// warning is logged.
#[derive(Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl EventNotifier for BroadcastNotifier {
    async fn dispatch(&self, event: DomainEvent) -> Result<()> {
        let operation = event.operation.clone();
        match self.sender.send(event) {
            Ok(receivers) => debug!(%operation, receivers, "domain event published"),
            Err(_) => warn!(%operation, "no subscribers for domain event"),
        }
        Ok(())
    }
}
