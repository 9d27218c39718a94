//! Call session snapshots
//!
//! A [`CallSession`] is the webphone's view of one call at a point in time.
//! The adapter copies it by value and never mutates it, apart from stamping
//! an end time on the way out.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Direction of a webphone call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallDirection {
    /// Call placed to this widget
    Inbound,
    /// Call placed from this widget
    Outbound,
}

/// Webphone-level status of a call session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Call set up but not answered yet
    #[serde(rename = "webphone-session-connecting")]
    Connecting,
    /// Media is flowing
    #[serde(rename = "webphone-session-connected")]
    Connected,
    /// Call is on hold
    #[serde(rename = "webphone-session-onHold")]
    OnHold,
    /// Call has ended
    #[serde(rename = "webphone-session-finished")]
    Finished,
}

/// Snapshot of a single call session, keyed by `id`
///
/// Fields the adapter does not interpret are kept in `extra` and passed
/// through to the host frame untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    /// Session identifier
    pub id: String,
    /// Remote number for outbound calls, local number for inbound ones
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,
    /// Originating number
    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<CallDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_status: Option<SessionStatus>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CallSession {
    /// Create a bare session snapshot with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            to: String::new(),
            from: String::new(),
            direction: None,
            call_status: None,
            start_time: None,
            extra: Map::new(),
        }
    }

    /// Set the remote/local numbers
    pub fn with_numbers(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = from.into();
        self.to = to.into();
        self
    }

    pub fn with_direction(mut self, direction: CallDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.call_status = Some(status);
        self
    }

    pub fn with_start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// An inbound session that has not been answered yet
    pub fn is_ring(&self) -> bool {
        self.direction == Some(CallDirection::Inbound)
            && self.call_status == Some(SessionStatus::Connecting)
    }
}

/// Session snapshot sent with an end notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndedCall {
    #[serde(flatten)]
    pub session: CallSession,
    /// Epoch milliseconds at which the end notification was produced
    pub end_time: i64,
}

/// Webphone sessions report unknown numbers as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
