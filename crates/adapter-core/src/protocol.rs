//! Wire protocol between the widget and its host frame
//!
//! Every message is a JSON object with a `type` field drawn from a closed set.
//! Inbound messages come from the host, outbound ones are posted to it.
//!
//! ```rust
//! use embeddable_adapter::protocol::InboundMessage;
//! use serde_json::json;
//!
//! let msg = InboundMessage::parse(&json!({
//!     "type": "rc-adapter-new-call",
//!     "phoneNumber": "650-555-0100",
//!     "toCall": true
//! }));
//! assert!(matches!(msg, Some(InboundMessage::NewCall { to_call: true, .. })));
//!
//! assert!(InboundMessage::parse(&json!({ "type": "rc-adapter-unknown" })).is_none());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::session::{CallSession, EndedCall};
use crate::state::{AdapterState, Position, PresenceStatus, Size};

/// Action requested by a `rc-adapter-control-call` message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallControlAction {
    Answer,
    Reject,
    Hangup,
    /// Any other action string; ignored by the control handler
    #[serde(other)]
    Unsupported,
}

/// Messages received from the host frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "rc-adapter-set-environment")]
    SetEnvironment,

    #[serde(rename = "rc-adapter-new-sms", rename_all = "camelCase")]
    NewSms { phone_number: String },

    #[serde(rename = "rc-adapter-new-call", rename_all = "camelCase")]
    NewCall {
        phone_number: String,
        #[serde(default, deserialize_with = "truthy")]
        to_call: bool,
    },

    #[serde(rename = "rc-adapter-control-call", rename_all = "camelCase")]
    ControlCall {
        call_action: CallControlAction,
        #[serde(default)]
        call_id: Option<String>,
    },

    #[serde(rename = "rc-adapter-sync-closed")]
    SyncClosed { closed: bool },

    #[serde(rename = "rc-adapter-sync-minimized")]
    SyncMinimized { minimized: bool },

    #[serde(rename = "rc-adapter-sync-size")]
    SyncSize { size: Size },

    #[serde(rename = "rc-adapter-sync-position")]
    SyncPosition { position: Position },
}

impl InboundMessage {
    /// Decode raw event data. Anything that is not a known, well-formed
    /// message yields `None`.
    pub fn parse(data: &Value) -> Option<Self> {
        if !data.is_object() {
            return None;
        }
        Self::deserialize(data).ok()
    }
}

/// Read any JSON value the way the host page's script would test it in a
/// condition: `null`, `false`, `0` and `""` are false, everything else true.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Messages posted to the host frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "rc-adapter-push-adapter-state")]
    PushAdapterState(AdapterState),

    #[serde(rename = "rc-adapter-sync-presence")]
    SyncPresence(PresenceStatus),

    #[serde(rename = "rc-adapter-push-locale")]
    PushLocale { locale: String },

    #[serde(rename = "rc-call-ring-notify")]
    RingCallNotify { call: CallSession },

    #[serde(rename = "rc-call-start-notify")]
    StartCallNotify { call: CallSession },

    #[serde(rename = "rc-call-end-notify")]
    EndCallNotify { call: EndedCall },
}

impl OutboundMessage {
    /// The wire `type` string
    pub fn message_type(&self) -> &'static str {
        match self {
            OutboundMessage::PushAdapterState(_) => "rc-adapter-push-adapter-state",
            OutboundMessage::SyncPresence(_) => "rc-adapter-sync-presence",
            OutboundMessage::PushLocale { .. } => "rc-adapter-push-locale",
            OutboundMessage::RingCallNotify { .. } => "rc-call-ring-notify",
            OutboundMessage::StartCallNotify { .. } => "rc-call-start-notify",
            OutboundMessage::EndCallNotify { .. } => "rc-call-end-notify",
        }
    }

    /// Encode as the JSON object handed to the transport
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PanelState, TelephonyStatus};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_control_call() {
        let msg = InboundMessage::parse(&json!({
            "type": "rc-adapter-control-call",
            "callAction": "hangup",
            "callId": "s-9"
        }));
        assert_eq!(
            msg,
            Some(InboundMessage::ControlCall {
                call_action: CallControlAction::Hangup,
                call_id: Some("s-9".to_string()),
            })
        );
    }

    #[test]
    fn test_unknown_action_is_still_a_control_message() {
        let msg = InboundMessage::parse(&json!({
            "type": "rc-adapter-control-call",
            "callAction": "transfer"
        }));
        assert_eq!(
            msg,
            Some(InboundMessage::ControlCall {
                call_action: CallControlAction::Unsupported,
                call_id: None,
            })
        );
    }

    #[test]
    fn test_set_environment_ignores_extra_fields() {
        let msg = InboundMessage::parse(&json!({
            "type": "rc-adapter-set-environment",
            "env": "sandbox"
        }));
        assert_eq!(msg, Some(InboundMessage::SetEnvironment));
    }

    #[test]
    fn test_new_call_defaults_to_call_false() {
        let msg = InboundMessage::parse(&json!({
            "type": "rc-adapter-new-call",
            "phoneNumber": "6505550100"
        }));
        assert_eq!(
            msg,
            Some(InboundMessage::NewCall {
                phone_number: "6505550100".to_string(),
                to_call: false,
            })
        );
    }

    #[test]
    fn test_to_call_follows_script_truthiness() {
        let to_call = |raw: Value| match InboundMessage::parse(&json!({
            "type": "rc-adapter-new-call",
            "phoneNumber": "6505550100",
            "toCall": raw
        })) {
            Some(InboundMessage::NewCall { to_call, .. }) => to_call,
            other => panic!("expected new-call, got {:?}", other),
        };

        assert!(!to_call(Value::Null));
        assert!(!to_call(json!(0)));
        assert!(!to_call(json!("")));
        assert!(to_call(json!("true")));
        assert!(to_call(json!(1)));
        assert!(to_call(json!(true)));
    }

    #[test]
    fn test_malformed_messages_are_dropped() {
        assert!(InboundMessage::parse(&Value::Null).is_none());
        assert!(InboundMessage::parse(&json!("rc-adapter-new-sms")).is_none());
        assert!(InboundMessage::parse(&json!({ "phoneNumber": "123" })).is_none());
        assert!(InboundMessage::parse(&json!({ "type": "rc-adapter-new-sms" })).is_none());
        assert!(InboundMessage::parse(&json!({ "type": "rc-adapter-new-sms", "phoneNumber": 42 })).is_none());
        assert!(InboundMessage::parse(&json!({ "type": "something-else" })).is_none());
    }

    #[test]
    fn test_base_messages() {
        let msg = InboundMessage::parse(&json!({
            "type": "rc-adapter-sync-size",
            "size": {"width": 320, "height": 560}
        }))
        .unwrap();
        assert_eq!(
            msg,
            InboundMessage::SyncSize {
                size: Size {
                    width: 320,
                    height: 560
                }
            }
        );
    }

    #[test]
    fn test_outbound_encoding() {
        let presence = PresenceStatus {
            telephony_status: Some(TelephonyStatus::NoCall),
            ..Default::default()
        };
        let value = OutboundMessage::SyncPresence(presence).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "type": "rc-adapter-sync-presence",
                "telephonyStatus": "NoCall",
                "userStatus": null,
                "dndStatus": null
            })
        );

        let state = AdapterState::compose(&PanelState::default(), PresenceStatus::default());
        let pushed = OutboundMessage::PushAdapterState(state);
        assert_eq!(pushed.to_value().unwrap()["type"], pushed.message_type());

        let ring = OutboundMessage::RingCallNotify {
            call: CallSession::new("a"),
        };
        assert_eq!(ring.to_value().unwrap(), json!({"type": "rc-call-ring-notify", "call": {"id": "a", "to": "", "from": ""}}));
    }
}
