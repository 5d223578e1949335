use std::sync::Arc;

use serde::Serialize;

/// Name of the liveness event emitted once when a stream opens.
pub const EVENT_CONNECTED: &str = "connected";

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
///
/// The data is reference counted so a single serialisation is shared by every subscriber.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: Arc<str>,
}

impl ServerEvent {
    /// Build an event from an already serialised payload.
    pub fn new(event: Option<String>, data: impl Into<Arc<str>>) -> Self {
        Self {
            event,
            data: data.into(),
        }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<T>(event: Option<String>, payload: &T) -> serde_json::Result<Self>
    where
        T: Serialize,
    {
        Ok(Self::new(event, serde_json::to_string(payload)?))
    }

    /// Liveness signal sent before any real snapshot reaches a new subscriber.
    pub fn connected() -> Self {
        Self::new(Some(EVENT_CONNECTED.to_string()), EVENT_CONNECTED)
    }
}
