use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use crate::{
    dto::sse::ServerEvent,
    state::{SharedState, Subscription},
};

/// Register a new overlay subscriber and expose it as an SSE response.
///
/// The connection is announced with a `connected` event; snapshots follow as they are published.
pub fn open_stream(state: &SharedState) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<>> {
    let subscription = state.sse().subscribe();
    info!(
        subscriber = %subscription.id(),
        subscribers = state.sse().subscriber_count(),
        "New SSE connection"
    );
    to_sse_stream(state.clone(), subscription)
}

/// Convert a hub subscription into an SSE response, forwarding events and
/// deregistering once the client disconnects.
pub fn to_sse_stream(
    state: SharedState,
    mut subscription: Subscription,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);
    let _ = tx.try_send(Ok(to_event(ServerEvent::connected())));

    let mut shutdown = state.shutdown_watcher();

    // forwarder task: reads from the hub and pushes into mpsc
    tokio::spawn(async move {
        let closing = *shutdown.borrow_and_update();
        if !closing {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = shutdown.changed() => break,
                    received = subscription.recv() => {
                        let Some(payload) = received else {
                            break;
                        };
                        if tx.send(Ok(to_event(payload))).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }

        let id = subscription.id();
        state.sse().unsubscribe(id);
        info!(
            subscriber = %id,
            subscribers = state.sse().subscriber_count(),
            "SSE stream disconnected"
        );
    });

    // response stream reads from mpsc; when client disconnects axum drops this stream
    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn to_event(payload: ServerEvent) -> Event {
    let mut event = Event::default().data(payload.data);
    if let Some(name) = payload.event {
        event = event.event(name);
    }
    event
}
