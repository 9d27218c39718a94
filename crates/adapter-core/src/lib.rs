//! # Embeddable Adapter
//!
//! Bridges an embedded phone widget with the page hosting it. The host frame
//! and the widget exchange typed JSON messages (`postMessage` in a browser);
//! the adapter turns host requests into widget navigation and webphone
//! commands, and mirrors presence, panel state and call lifecycle back to the
//! host.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use embeddable_adapter::{Adapter, AdapterConfig, CallSession, OutboundMessage};
//! use embeddable_adapter::memory::MemoryWidget;
//!
//! let widget = Arc::new(MemoryWidget::new());
//! let mut adapter = Adapter::new(AdapterConfig::default(), widget.deps());
//!
//! adapter.ring_call_notify(&CallSession::new("a"));
//! adapter.ring_call_notify(&CallSession::new("a"));
//!
//! let posted = widget.posted();
//! assert_eq!(posted.len(), 1);
//! assert!(matches!(posted[0], OutboundMessage::RingCallNotify { .. }));
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - inbound and outbound message types
//! - [`adapter`] - message router, state publisher, call control, navigation
//! - [`tracker`] - call session deduplication
//! - [`runtime`] - single-threaded event loop
//! - [`calendar`] - conference invite button

pub mod adapter;
pub mod calendar;
pub mod clock;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod logging;
pub mod memory;
pub mod normalize;
pub mod protocol;
pub mod publisher;
pub mod runtime;
pub mod session;
pub mod state;
pub mod tracker;
pub mod transport;

// Re-export main types
pub use adapter::Adapter;
pub use collaborators::AdapterDeps;
pub use config::AdapterConfig;
pub use error::{AdapterError, AdapterResult};
pub use protocol::{CallControlAction, InboundMessage, OutboundMessage};
pub use runtime::{AdapterEvent, AdapterHandle};
pub use session::{CallDirection, CallSession, SessionStatus};
pub use state::{AdapterState, PresenceStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
