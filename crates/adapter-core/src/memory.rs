//! In-memory widget backing every collaborator trait
//!
//! Used by the CLI and by tests. Reads come from a mutable [`WidgetModel`];
//! commands and posted messages are recorded for inspection.
//!
//! ```rust
//! use std::sync::Arc;
//! use embeddable_adapter::{Adapter, AdapterConfig, memory::MemoryWidget};
//!
//! let widget = Arc::new(MemoryWidget::new());
//! widget.update(|model| model.logged_in = true);
//!
//! let mut adapter = Adapter::new(AdapterConfig::default(), widget.deps());
//! adapter.on_state_change();
//! assert!(adapter.ready());
//! assert!(!widget.posted().is_empty());
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::collaborators::{
    AdapterDeps, Auth, CallMonitor, ComposeText, DialerUi, HostWindow, Locale, Presence,
    RegionSettings, RouterInteraction, Webphone,
};
use crate::error::AdapterResult;
use crate::protocol::OutboundMessage;
use crate::session::CallSession;
use crate::state::{DndStatus, TelephonyStatus, UserStatus};

/// Readable widget state
#[derive(Debug, Clone)]
pub struct WidgetModel {
    pub logged_in: bool,
    pub telephony_status: Option<TelephonyStatus>,
    pub user_status: Option<UserStatus>,
    pub dnd_status: Option<DndStatus>,
    pub ring_session_id: Option<String>,
    pub active_session_id: Option<String>,
    pub sessions: Vec<CallSession>,
    pub country_code: String,
    pub area_code: String,
    pub call_idle: bool,
    pub locale: String,
    /// Whether the host page exposes an environment toggle
    pub environment_toggle: bool,
}

impl Default for WidgetModel {
    fn default() -> Self {
        Self {
            logged_in: false,
            telephony_status: None,
            user_status: None,
            dnd_status: None,
            ring_session_id: None,
            active_session_id: None,
            sessions: Vec::new(),
            country_code: "US".to_string(),
            area_code: String::new(),
            call_idle: true,
            locale: "en-US".to_string(),
            environment_toggle: false,
        }
    }
}

/// Command issued by the adapter to the widget or the host page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    Answer(String),
    Reject(String),
    Hangup(String),
    Navigate(String),
    SetToNumber(String),
    Dial(String),
    TypingToNumber(String),
    InsertStylesheet(String),
    ToggleEnvironment,
    OpenWindow(String),
}

/// A message posted to the parent frame, with its target origin
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub message: OutboundMessage,
    pub target_origin: String,
}

#[derive(Debug, Default)]
pub struct MemoryWidget {
    model: RwLock<WidgetModel>,
    actions: Mutex<Vec<WidgetAction>>,
    posted: Mutex<Vec<PostedMessage>>,
}

impl MemoryWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: WidgetModel) -> Self {
        Self {
            model: RwLock::new(model),
            ..Default::default()
        }
    }

    /// Mutate the readable state
    pub fn update(&self, f: impl FnOnce(&mut WidgetModel)) {
        f(&mut self.model.write());
    }

    pub fn model(&self) -> WidgetModel {
        self.model.read().clone()
    }

    pub fn actions(&self) -> Vec<WidgetAction> {
        self.actions.lock().clone()
    }

    /// Messages posted so far, oldest first
    pub fn posted(&self) -> Vec<OutboundMessage> {
        self.posted.lock().iter().map(|p| p.message.clone()).collect()
    }

    pub fn posted_with_origin(&self) -> Vec<PostedMessage> {
        self.posted.lock().clone()
    }

    /// Drain recorded messages and actions
    pub fn clear(&self) {
        self.actions.lock().clear();
        self.posted.lock().clear();
    }

    /// Collaborator set with every slot served by this widget
    pub fn deps(self: &Arc<Self>) -> AdapterDeps {
        AdapterDeps {
            auth: self.clone(),
            presence: self.clone(),
            webphone: self.clone(),
            dialer_ui: self.clone(),
            compose_text: self.clone(),
            region_settings: self.clone(),
            call: self.clone(),
            router: self.clone(),
            locale: self.clone(),
            host: self.clone(),
        }
    }

    fn record(&self, action: WidgetAction) {
        info!(?action, "widget action");
        self.actions.lock().push(action);
    }
}

impl Auth for MemoryWidget {
    fn logged_in(&self) -> bool {
        self.model.read().logged_in
    }
}

impl Presence for MemoryWidget {
    fn telephony_status(&self) -> Option<TelephonyStatus> {
        self.model.read().telephony_status
    }

    fn user_status(&self) -> Option<UserStatus> {
        self.model.read().user_status
    }

    fn dnd_status(&self) -> Option<DndStatus> {
        self.model.read().dnd_status
    }
}

impl Webphone for MemoryWidget {
    fn answer(&self, session_id: &str) {
        self.record(WidgetAction::Answer(session_id.to_string()));
    }

    fn reject(&self, session_id: &str) {
        self.record(WidgetAction::Reject(session_id.to_string()));
    }

    fn hangup(&self, session_id: &str) {
        self.record(WidgetAction::Hangup(session_id.to_string()));
    }

    fn ring_session_id(&self) -> Option<String> {
        self.model.read().ring_session_id.clone()
    }

    fn active_session_id(&self) -> Option<String> {
        self.model.read().active_session_id.clone()
    }

    fn sessions(&self) -> Vec<CallSession> {
        self.model.read().sessions.clone()
    }
}

impl DialerUi for MemoryWidget {
    fn set_to_number_field(&self, phone_number: &str) {
        self.record(WidgetAction::SetToNumber(phone_number.to_string()));
    }

    fn call(&self, phone_number: &str) {
        self.record(WidgetAction::Dial(phone_number.to_string()));
    }
}

impl ComposeText for MemoryWidget {
    fn update_typing_to_number(&self, phone_number: &str) {
        self.record(WidgetAction::TypingToNumber(phone_number.to_string()));
    }
}

impl RegionSettings for MemoryWidget {
    fn country_code(&self) -> String {
        self.model.read().country_code.clone()
    }

    fn area_code(&self) -> String {
        self.model.read().area_code.clone()
    }
}

impl CallMonitor for MemoryWidget {
    fn is_idle(&self) -> bool {
        self.model.read().call_idle
    }
}

impl RouterInteraction for MemoryWidget {
    fn push(&self, route: &str) {
        self.record(WidgetAction::Navigate(route.to_string()));
    }
}

impl Locale for MemoryWidget {
    fn current_locale(&self) -> String {
        self.model.read().locale.clone()
    }
}

impl HostWindow for MemoryWidget {
    fn post_message(&self, message: &OutboundMessage, target_origin: &str) -> AdapterResult<()> {
        self.posted.lock().push(PostedMessage {
            message: message.clone(),
            target_origin: target_origin.to_string(),
        });
        Ok(())
    }

    fn toggle_environment(&self) -> bool {
        if !self.model.read().environment_toggle {
            return false;
        }
        self.record(WidgetAction::ToggleEnvironment);
        true
    }

    fn insert_stylesheet(&self, href: &str) {
        self.record(WidgetAction::InsertStylesheet(href.to_string()));
    }

    fn open_window(&self, url: &str) {
        self.record(WidgetAction::OpenWindow(url.to_string()));
    }
}
