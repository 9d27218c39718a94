//! Event loop tests

use std::sync::Arc;

use embeddable_adapter::memory::{MemoryWidget, WidgetAction};
use embeddable_adapter::runtime::{self, AdapterEvent};
use embeddable_adapter::transport::JsonLinesWindow;
use embeddable_adapter::{Adapter, AdapterConfig, AdapterDeps, CallSession, OutboundMessage};
use serde_json::json;

#[tokio::test]
async fn test_loop_stops_on_shutdown_and_returns_adapter() {
    let widget = Arc::new(MemoryWidget::new());
    widget.update(|m| m.logged_in = true);
    let adapter = Adapter::new(AdapterConfig::default(), widget.deps());
    let (handle, rx) = runtime::channel(runtime::DEFAULT_QUEUE_CAPACITY);

    let task = tokio::spawn(runtime::run(adapter, rx));

    assert!(handle.state_changed().await);
    assert!(handle.send(AdapterEvent::CallRing(CallSession::new("a"))).await);
    assert!(handle.shutdown().await);

    let adapter = task.await.unwrap();
    assert!(adapter.ready());
    assert!(adapter.sessions().contains("a"));

    // Loop is gone, further sends fail
    assert!(!handle.post_message(json!({"type": "rc-adapter-set-environment"})).await);
}

#[tokio::test]
async fn test_loop_initializes_host_page_first() {
    let widget = Arc::new(MemoryWidget::new());
    widget.update(|m| m.logged_in = true);
    let config = AdapterConfig::new().with_styles_uri("https://cdn.example.com/x.css");
    let adapter = Adapter::new(config, widget.deps());
    let (handle, rx) = runtime::channel(4);

    let task = tokio::spawn(runtime::run(adapter, rx));
    handle
        .post_message(json!({"type": "rc-adapter-new-sms", "phoneNumber": "101"}))
        .await;
    drop(handle);
    task.await.unwrap();

    assert_eq!(
        widget.actions(),
        vec![
            WidgetAction::InsertStylesheet("https://cdn.example.com/x.css".to_string()),
            WidgetAction::Navigate("/composeText".to_string()),
            WidgetAction::TypingToNumber("101".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_json_lines_host_receives_notifications() {
    let widget = Arc::new(MemoryWidget::new());
    let deps = AdapterDeps {
        host: Arc::new(JsonLinesWindow::new(std::io::sink())),
        ..widget.deps()
    };
    let adapter = Adapter::new(AdapterConfig::default(), deps);
    let (handle, rx) = runtime::channel(4);

    let task = tokio::spawn(runtime::run(adapter, rx));
    handle.send(AdapterEvent::CallRing(CallSession::new("a"))).await;
    handle.send(AdapterEvent::CallEnd(CallSession::new("a"))).await;
    drop(handle);
    let adapter = task.await.unwrap();

    // Messages went to the JSON-lines host, not the in-memory one
    assert!(widget.posted().is_empty());
    assert!(adapter.sessions().is_empty());
}

#[tokio::test]
async fn test_events_are_applied_in_order() {
    let widget = Arc::new(MemoryWidget::new());
    let adapter = Adapter::new(AdapterConfig::default(), widget.deps());
    let (handle, rx) = runtime::channel(8);

    let task = tokio::spawn(runtime::run(adapter, rx));
    // End before ring: the end is for an untracked session and is dropped
    handle.send(AdapterEvent::CallEnd(CallSession::new("b"))).await;
    handle.send(AdapterEvent::CallRing(CallSession::new("b"))).await;
    drop(handle);
    let adapter = task.await.unwrap();

    assert_eq!(
        widget.posted(),
        vec![OutboundMessage::RingCallNotify {
            call: CallSession::new("b")
        }]
    );
    assert!(adapter.sessions().contains("b"));
}
