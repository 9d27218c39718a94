//! JSON-lines host window
//!
//! Stands in for `window.parent` outside a browser: every posted message is
//! written as one JSON object per line. Page-level operations (stylesheets,
//! new tabs) have no native counterpart and are only logged.

use std::io::Write;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::collaborators::HostWindow;
use crate::error::{AdapterError, AdapterResult};
use crate::protocol::OutboundMessage;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    target_origin: &'a str,
    data: &'a OutboundMessage,
}

/// Host window writing posted messages to `W`
pub struct JsonLinesWindow<W: Write + Send> {
    writer: Mutex<W>,
    with_origin: bool,
}

impl<W: Write + Send> JsonLinesWindow<W> {
    /// Write bare messages
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            with_origin: false,
        }
    }

    /// Wrap each message as `{"targetOrigin": ..., "data": ...}`
    pub fn with_envelope(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            with_origin: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> HostWindow for JsonLinesWindow<W> {
    fn post_message(&self, message: &OutboundMessage, target_origin: &str) -> AdapterResult<()> {
        let line = if self.with_origin {
            serde_json::to_string(&Envelope {
                target_origin,
                data: message,
            })?
        } else {
            serde_json::to_string(message)?
        };

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| AdapterError::transport(e.to_string()))
    }

    fn toggle_environment(&self) -> bool {
        debug!("environment toggle is not available outside a browser");
        false
    }

    fn insert_stylesheet(&self, href: &str) {
        info!(href, "stylesheet requested");
    }

    fn open_window(&self, url: &str) {
        info!(url, "window open requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CallSession;
    use serde_json::Value;

    #[test]
    fn test_writes_one_line_per_message() {
        let window = JsonLinesWindow::new(Vec::new());
        let ring = OutboundMessage::RingCallNotify {
            call: CallSession::new("a"),
        };
        window.post_message(&ring, "*").unwrap();
        window.post_message(&ring, "*").unwrap();

        let out = String::from_utf8(window.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "rc-call-ring-notify");
        assert_eq!(first["call"]["id"], "a");
    }

    #[test]
    fn test_envelope_carries_origin() {
        let window = JsonLinesWindow::with_envelope(Vec::new());
        let locale = OutboundMessage::PushLocale {
            locale: "de-DE".to_string(),
        };
        window.post_message(&locale, "https://crm.example.com").unwrap();

        let out = String::from_utf8(window.into_inner()).unwrap();
        let value: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["targetOrigin"], "https://crm.example.com");
        assert_eq!(value["data"]["locale"], "de-DE");
    }

    #[test]
    fn test_page_operations_are_inert() {
        let window = JsonLinesWindow::new(Vec::new());
        assert!(!window.toggle_environment());
        window.insert_stylesheet("https://cdn.example.com/a.css");
        window.open_window("https://example.com");
        assert!(window.into_inner().is_empty());
    }
}
