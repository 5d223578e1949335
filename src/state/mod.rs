//! Shared application state: the current snapshot, the metadata table and the SSE hub.

pub mod metadata;
pub mod snapshot;
mod sse;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::error::ServiceError;

pub use self::metadata::{ChallengeMetadataEntry, MetadataStore};
pub use self::snapshot::{AugmentedChallenge, FALLBACK_ICON, Snapshot, Team};
pub use self::sse::{SUBSCRIBER_BUFFER, SseHub, SubscriberId, Subscription};

pub type SharedState = Arc<AppState>;

/// HTML template served on `/` when no override is configured.
pub const DEFAULT_PAGE_TEMPLATE: &str = include_str!("../../assets/index.html");

/// Central application state injected into every handler.
pub struct AppState {
    snapshot: RwLock<Arc<Snapshot>>,
    metadata: MetadataStore,
    sse: SseHub,
    page_template: String,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The state starts out with [`Snapshot::placeholder`] and the embedded page template.
    pub fn new(metadata: MetadataStore) -> SharedState {
        Self::with_page_template(metadata, DEFAULT_PAGE_TEMPLATE.to_string())
    }

    /// Same as [`AppState::new`] but serving `page_template` on `/`.
    pub fn with_page_template(metadata: MetadataStore, page_template: String) -> SharedState {
        let (shutdown, _rx) = watch::channel(false);
        Arc::new(Self {
            snapshot: RwLock::new(Arc::new(Snapshot::placeholder())),
            metadata,
            sse: SseHub::new(),
            page_template,
            shutdown,
        })
    }

    /// Static challenge metadata loaded at startup.
    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Broadcast hub used for the overlay SSE stream.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }

    /// Raw HTML template for the overlay page.
    pub fn page_template(&self) -> &str {
        &self.page_template
    }

    /// Subscribe to the shutdown flag; open streams end once it flips to `true`.
    pub fn shutdown_watcher(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Ask every open stream to close so the server can drain its connections.
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// The snapshot currently considered authoritative.
    pub async fn current_snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Atomically replace the current snapshot and publish it to every subscriber.
    ///
    /// The write lock is held across the publish so subscribers observe snapshots in the
    /// same order they were applied. Nothing changes when serialisation fails.
    pub async fn replace_snapshot(&self, snapshot: Snapshot) -> Result<usize, ServiceError> {
        let mut guard = self.snapshot.write().await;
        let delivered = self
            .sse
            .publish(&snapshot)
            .map_err(|err| ServiceError::Malformed(err.to_string()))?;
        *guard = Arc::new(snapshot);
        Ok(delivered)
    }
}
