//! Single-threaded event loop feeding the adapter
//!
//! Host messages, widget state changes and webphone call events are queued
//! on one channel and handled strictly in order. The loop owns the adapter,
//! so no handler ever runs concurrently with another.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, Instrument};

use crate::adapter::Adapter;
use crate::session::CallSession;

/// Default capacity of the event queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Something the adapter must react to
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterEvent {
    /// Raw `data` of a window `message` event
    Message(Value),
    /// Widget state changed somewhere
    StateChanged,
    /// Webphone reported a ringing call
    CallRing(CallSession),
    /// Webphone reported a started call
    CallStart(CallSession),
    /// Webphone reported an ended call
    CallEnd(CallSession),
    /// Stop the loop
    Shutdown,
}

/// Sending half of the event queue
#[derive(Debug, Clone)]
pub struct AdapterHandle {
    tx: mpsc::Sender<AdapterEvent>,
}

impl AdapterHandle {
    /// Queue an event. Returns `false` once the loop has stopped.
    pub async fn send(&self, event: AdapterEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    pub async fn post_message(&self, data: Value) -> bool {
        self.send(AdapterEvent::Message(data)).await
    }

    pub async fn state_changed(&self) -> bool {
        self.send(AdapterEvent::StateChanged).await
    }

    pub async fn shutdown(&self) -> bool {
        self.send(AdapterEvent::Shutdown).await
    }
}

/// Create an event queue
pub fn channel(capacity: usize) -> (AdapterHandle, mpsc::Receiver<AdapterEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    (AdapterHandle { tx }, rx)
}

/// Apply one event to the adapter. Returns `false` on shutdown.
pub fn dispatch(adapter: &mut Adapter, event: AdapterEvent) -> bool {
    match event {
        AdapterEvent::Message(data) => adapter.on_message(&data),
        AdapterEvent::StateChanged => adapter.on_state_change(),
        AdapterEvent::CallRing(session) => adapter.ring_call_notify(&session),
        AdapterEvent::CallStart(session) => adapter.start_call_notify(&session),
        AdapterEvent::CallEnd(session) => adapter.end_call_notify(&session),
        AdapterEvent::Shutdown => return false,
    }
    true
}

/// Initialize the adapter and process events until shutdown or until every
/// handle is dropped. The adapter is handed back for teardown.
pub async fn run(mut adapter: Adapter, mut events: mpsc::Receiver<AdapterEvent>) -> Adapter {
    let span = info_span!("adapter", prefix = %adapter.config().prefix);
    async move {
        adapter.initialize();
        info!("adapter event loop started");

        while let Some(event) = events.recv().await {
            if !dispatch(&mut adapter, event) {
                debug!("shutdown requested");
                break;
            }
        }

        events.close();
        info!(tracked_sessions = adapter.sessions().len(), "adapter event loop stopped");
        adapter
    }
    .instrument(span)
    .await
}
