use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{dto::sse::ServerEvent, state::snapshot::Snapshot};

/// Identifier handed out for every registered subscriber.
pub type SubscriberId = Uuid;

/// Events a subscriber may have queued before it is treated as stalled and dropped.
pub const SUBSCRIBER_BUFFER: usize = 64;

/// Receiving half of a registration with the [`SseHub`].
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<ServerEvent>,
}

impl Subscription {
    /// Identifier to pass to [`SseHub::unsubscribe`] on teardown.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next published event; `None` once the hub dropped this subscriber.
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        self.receiver.recv().await
    }

    /// Non-blocking variant of [`Subscription::recv`].
    pub fn try_recv(&mut self) -> Option<ServerEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Observer registry fanning every published snapshot out to all live subscribers.
#[derive(Default)]
pub struct SseHub {
    subscribers: DashMap<SubscriberId, mpsc::Sender<ServerEvent>>,
}

impl SseHub {
    /// Construct an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber that will receive subsequent publishes only.
    pub fn subscribe(&self) -> Subscription {
        let (tx, receiver) = mpsc::channel(SUBSCRIBER_BUFFER);
        let id = Uuid::new_v4();
        self.subscribers.insert(id, tx);
        Subscription { id, receiver }
    }

    /// Remove a subscriber; unknown or already removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.remove(&id);
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Serialise `snapshot` once and deliver it to every subscriber.
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&self, snapshot: &Snapshot) -> serde_json::Result<usize> {
        let event = ServerEvent::json(None, snapshot)?;
        Ok(self.broadcast(event))
    }

    /// Send an event to all current subscribers.
    ///
    /// Subscribers whose receiver is gone, or whose queue already holds
    /// [`SUBSCRIBER_BUFFER`] undelivered events, are removed; their stream then ends.
    pub fn broadcast(&self, event: ServerEvent) -> usize {
        let mut delivered = 0;
        self.subscribers.retain(|id, tx| match tx.try_send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                warn!(subscriber = %id, "dropping stalled SSE subscriber");
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!(subscriber = %id, "dropping closed SSE subscriber");
                false
            }
        });
        delivered
    }
}
