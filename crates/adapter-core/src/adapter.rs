//! The adapter bridging widget state and the host frame
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  InboundMessage   ┌──────────────────────────┐
//! │  Host frame  │ ────────────────▶ │         Adapter          │
//! │  (parent)    │                   │ ┌──────────────────────┐ │
//! │              │ ◀──────────────── │ │ router               │ │ ──▶ Webphone
//! └──────────────┘  OutboundMessage  │ │ publisher cache      │ │ ──▶ DialerUi / ComposeText
//!                                    │ │ call session tracker │ │ ──▶ RouterInteraction
//!                                    │ └──────────────────────┘ │
//!                                    └──────────────────────────┘
//! ```
//!
//! All methods run to completion on the caller's thread. The adapter owns its
//! state outright; see [`crate::runtime`] for the event loop that feeds it.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::collaborators::AdapterDeps;
use crate::config::AdapterConfig;
use crate::normalize::normalize_number;
use crate::protocol::{CallControlAction, InboundMessage, OutboundMessage};
use crate::publisher::{raw_presence, visible_presence, PublishedState};
use crate::session::CallSession;
use crate::state::{AdapterState, ModuleStatus, PanelState};
use crate::tracker::CallSessionTracker;

/// Route of the SMS compose page
pub const COMPOSE_TEXT_ROUTE: &str = "/composeText";

/// Route of the dialer page
pub const DIALER_ROUTE: &str = "/dialer";

/// Message bridge between the widget and its host frame
pub struct Adapter {
    config: AdapterConfig,
    deps: AdapterDeps,
    clock: Arc<dyn Clock>,
    panel: PanelState,
    published: PublishedState,
    sessions: CallSessionTracker,
}

impl Adapter {
    pub fn new(config: AdapterConfig, deps: AdapterDeps) -> Self {
        Self::with_clock(config, deps, Arc::new(SystemClock))
    }

    /// Create an adapter stamping end times from `clock`
    pub fn with_clock(config: AdapterConfig, deps: AdapterDeps, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            deps,
            clock,
            panel: PanelState::default(),
            published: PublishedState::new(),
            sessions: CallSessionTracker::new(),
        }
    }

    /// Host-page setup performed once before any event is processed
    pub fn initialize(&mut self) {
        if let Some(href) = self.config.styles_uri.as_deref() {
            info!(href, "inserting extended stylesheet");
            self.deps.host.insert_stylesheet(href);
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn sessions(&self) -> &CallSessionTracker {
        &self.sessions
    }

    pub fn ready(&self) -> bool {
        self.panel.status == ModuleStatus::Ready
    }

    pub fn pending(&self) -> bool {
        self.panel.status == ModuleStatus::Pending
    }

    /// Snapshot of the state the host frame sees
    pub fn state(&self) -> AdapterState {
        let presence = visible_presence(self.deps.auth.as_ref(), self.deps.presence.as_ref());
        AdapterState::compose(&self.panel, presence)
    }

    // ===== STATE PUBLISHER =====

    /// React to a change anywhere in widget state
    pub fn on_state_change(&mut self) {
        if self.pending() {
            self.panel.status = ModuleStatus::Initializing;
            self.push_adapter_state();
            self.panel.status = ModuleStatus::Ready;
            info!(prefix = %self.config.prefix, "adapter ready");
        }
        self.push_presence();
        self.push_locale();
    }

    fn push_adapter_state(&self) {
        self.post_message(OutboundMessage::PushAdapterState(self.state()));
    }

    fn push_presence(&mut self) {
        if !self.ready() {
            return;
        }
        let current = raw_presence(self.deps.presence.as_ref());
        if self.published.update_presence(current) {
            let visible = visible_presence(self.deps.auth.as_ref(), self.deps.presence.as_ref());
            self.post_message(OutboundMessage::SyncPresence(visible));
        }
    }

    fn push_locale(&mut self) {
        if !self.ready() {
            return;
        }
        let locale = self.deps.locale.current_locale();
        if locale.is_empty() {
            return;
        }
        if self.published.update_locale(&locale) {
            self.post_message(OutboundMessage::PushLocale { locale });
        }
    }

    // ===== MESSAGE ROUTER =====

    /// Handle raw event data from the host frame
    pub fn on_message(&mut self, data: &Value) {
        let Some(message) = InboundMessage::parse(data) else {
            debug!("ignoring unrecognized host message");
            return;
        };
        self.handle_message(message);
    }

    /// Dispatch an already decoded message
    pub fn handle_message(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::SetEnvironment => self.set_environment(),
            InboundMessage::NewSms { phone_number } => self.new_sms(&phone_number),
            InboundMessage::NewCall {
                phone_number,
                to_call,
            } => self.new_call(&phone_number, to_call),
            InboundMessage::ControlCall {
                call_action,
                call_id,
            } => self.control_call(call_action, call_id.as_deref()),
            base => self.handle_base_message(base),
        }
    }

    /// Panel geometry messages shared by every widget flavour
    fn handle_base_message(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::SyncClosed { closed } => self.panel.closed = closed,
            InboundMessage::SyncMinimized { minimized } => self.panel.minimized = minimized,
            InboundMessage::SyncSize { size } => self.panel.size = size,
            InboundMessage::SyncPosition { position } => self.panel.position = position,
            _ => return,
        }
        self.on_state_change();
    }

    fn set_environment(&self) {
        if !self.deps.host.toggle_environment() {
            debug!("host page has no environment toggle");
        }
    }

    // ===== CALL SESSION TRACKER =====

    /// Tell the host about a ringing call, once per session id
    pub fn ring_call_notify(&mut self, session: &CallSession) {
        if let Some(message) = self.sessions.ring(session) {
            self.post_message(message);
        }
    }

    /// Tell the host a call started; suppressed unless it was last seen ringing
    pub fn start_call_notify(&mut self, session: &CallSession) {
        if let Some(message) = self.sessions.start(session) {
            self.post_message(message);
        }
    }

    /// Tell the host a tracked call ended
    pub fn end_call_notify(&mut self, session: &CallSession) {
        let end_time = self.clock.now_millis();
        if let Some(message) = self.sessions.end(session, end_time) {
            self.post_message(message);
        }
    }

    // ===== CONTROL CALL =====

    /// Forward a call control request to the webphone.
    ///
    /// A non-empty `id` must belong to a tracked session. Without one, answer
    /// and reject target the ringing session and hangup the active one.
    pub fn control_call(&self, action: CallControlAction, id: Option<&str>) {
        let id = id.filter(|id| !id.is_empty());
        if let Some(id) = id {
            if !self.sessions.contains(id) {
                debug!(call_id = id, "control request for untracked session");
                return;
            }
        }

        let webphone = &self.deps.webphone;
        let target = match action {
            CallControlAction::Answer | CallControlAction::Reject => {
                id.map(str::to_string).or_else(|| webphone.ring_session_id())
            }
            CallControlAction::Hangup => id.map(str::to_string).or_else(|| webphone.active_session_id()),
            CallControlAction::Unsupported => return,
        };
        let Some(target) = target else {
            debug!(?action, "no session to control");
            return;
        };

        match action {
            CallControlAction::Answer => webphone.answer(&target),
            CallControlAction::Reject => webphone.reject(&target),
            CallControlAction::Hangup => webphone.hangup(&target),
            CallControlAction::Unsupported => {}
        }
    }

    // ===== UI NAVIGATION =====

    /// Open the SMS composer addressed to `phone_number`
    pub fn new_sms(&self, phone_number: &str) {
        if !self.deps.auth.logged_in() {
            return;
        }
        self.deps.router.push(COMPOSE_TEXT_ROUTE);
        self.deps.compose_text.update_typing_to_number(phone_number);
    }

    /// Open the dialer for `phone_number`, dialing right away when `to_call`
    pub fn new_call(&self, phone_number: &str, to_call: bool) {
        if !self.deps.auth.logged_in() {
            return;
        }
        if !self.deps.call.is_idle() {
            return;
        }
        if self.is_call_ongoing(phone_number) {
            debug!("a session to this number is already up");
            return;
        }
        self.deps.router.push(DIALER_ROUTE);
        self.deps.dialer_ui.set_to_number_field(phone_number);
        if to_call {
            self.deps.dialer_ui.call(phone_number);
        }
    }

    fn is_call_ongoing(&self, phone_number: &str) -> bool {
        let region = &self.deps.region_settings;
        let normalized = normalize_number(phone_number, &region.country_code(), &region.area_code());
        self.deps
            .webphone
            .sessions()
            .iter()
            .any(|session| session.to == normalized)
    }

    fn post_message(&self, message: OutboundMessage) {
        debug!(message_type = message.message_type(), "posting to host frame");
        if let Err(e) = self.deps.host.post_message(&message, &self.config.target_origin) {
            warn!(message_type = message.message_type(), "failed to post to host frame: {}", e);
        }
    }
}
