//! Call session tracker
//!
//! Deduplicates ring/start/end notifications coming from the webphone so the
//! host frame hears about each transition once.

use std::collections::HashMap;

use tracing::debug;

use crate::protocol::OutboundMessage;
use crate::session::{CallSession, EndedCall};

/// Last-known snapshot of every call the host has been told about
#[derive(Debug, Default, Clone)]
pub struct CallSessionTracker {
    sessions: HashMap<String, CallSession>,
}

impl CallSessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a ringing session. Returns `None` when the id is already tracked.
    pub fn ring(&mut self, session: &CallSession) -> Option<OutboundMessage> {
        if self.sessions.contains_key(&session.id) {
            debug!(call_id = %session.id, "ring already notified");
            return None;
        }
        let call = session.clone();
        self.sessions.insert(session.id.clone(), call.clone());
        Some(OutboundMessage::RingCallNotify { call })
    }

    /// Track a started session. A tracked session only produces a start
    /// notification if it was last seen ringing.
    pub fn start(&mut self, session: &CallSession) -> Option<OutboundMessage> {
        if let Some(last) = self.sessions.get(&session.id) {
            if !last.is_ring() {
                debug!(call_id = %session.id, "start already notified");
                return None;
            }
        }
        let call = session.clone();
        self.sessions.insert(session.id.clone(), call.clone());
        Some(OutboundMessage::StartCallNotify { call })
    }

    /// Stop tracking a session, stamping it with `end_time`.
    pub fn end(&mut self, session: &CallSession, end_time: i64) -> Option<OutboundMessage> {
        if self.sessions.remove(&session.id).is_none() {
            debug!(call_id = %session.id, "end for untracked session");
            return None;
        }
        Some(OutboundMessage::EndCallNotify {
            call: EndedCall {
                session: session.clone(),
                end_time,
            },
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&CallSession> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CallDirection, SessionStatus};
    use pretty_assertions::assert_eq;

    fn ringing(id: &str) -> CallSession {
        CallSession::new(id)
            .with_direction(CallDirection::Inbound)
            .with_status(SessionStatus::Connecting)
    }

    #[test]
    fn test_ring_is_idempotent_per_id() {
        let mut tracker = CallSessionTracker::new();

        let first = tracker.ring(&CallSession::new("a"));
        assert!(matches!(first, Some(OutboundMessage::RingCallNotify { .. })));
        assert!(tracker.contains("a"));

        assert_eq!(tracker.ring(&CallSession::new("a")), None);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_start_after_ring_is_notified_once() {
        let mut tracker = CallSessionTracker::new();
        tracker.ring(&ringing("a"));

        let answered = ringing("a").with_status(SessionStatus::Connected);
        let msg = tracker.start(&answered);
        assert_eq!(msg, Some(OutboundMessage::StartCallNotify { call: answered.clone() }));
        assert_eq!(tracker.get("a"), Some(&answered));

        assert_eq!(tracker.start(&answered), None);
    }

    #[test]
    fn test_start_without_ring_tracks_outbound_call() {
        let mut tracker = CallSessionTracker::new();
        let outbound = CallSession::new("b")
            .with_direction(CallDirection::Outbound)
            .with_status(SessionStatus::Connecting);

        assert!(tracker.start(&outbound).is_some());
        assert!(tracker.contains("b"));
    }

    #[test]
    fn test_start_suppressed_when_tracked_entry_not_ringing() {
        let mut tracker = CallSessionTracker::new();
        // Tracked via ring, but the snapshot was not itself ringing
        tracker.ring(&CallSession::new("c"));
        assert_eq!(tracker.start(&CallSession::new("c")), None);
    }

    #[test]
    fn test_end_removes_and_stamps() {
        let mut tracker = CallSessionTracker::new();
        let session = ringing("a").with_start_time(1_000);
        tracker.ring(&session);

        match tracker.end(&session, 4_000) {
            Some(OutboundMessage::EndCallNotify { call }) => {
                assert_eq!(call.end_time, 4_000);
                assert_eq!(call.session.id, "a");
                assert!(call.end_time > call.session.start_time.unwrap());
            }
            other => panic!("expected end notify, got {:?}", other),
        }
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_end_for_untracked_is_silent() {
        let mut tracker = CallSessionTracker::new();
        assert_eq!(tracker.end(&CallSession::new("ghost"), 1), None);
    }

    #[test]
    fn test_ring_again_after_end() {
        let mut tracker = CallSessionTracker::new();
        tracker.ring(&CallSession::new("a"));
        tracker.end(&CallSession::new("a"), 10);
        assert!(tracker.ring(&CallSession::new("a")).is_some());
    }
}
