//! Interfaces the adapter consumes from the rest of the widget and the host page
//!
//! The adapter never owns these modules; it reads from them and forwards
//! commands. Every trait is object safe so the adapter can hold them as
//! `Arc<dyn ...>`.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::error::AdapterResult;
use crate::protocol::OutboundMessage;
use crate::session::CallSession;
use crate::state::{DndStatus, TelephonyStatus, UserStatus};

/// Authentication state
#[cfg_attr(test, automock)]
pub trait Auth: Send + Sync {
    fn logged_in(&self) -> bool;
}

/// Current presence of the logged-in user
#[cfg_attr(test, automock)]
pub trait Presence: Send + Sync {
    fn telephony_status(&self) -> Option<TelephonyStatus>;
    fn user_status(&self) -> Option<UserStatus>;
    fn dnd_status(&self) -> Option<DndStatus>;
}

/// Browser-based phone
#[cfg_attr(test, automock)]
pub trait Webphone: Send + Sync {
    fn answer(&self, session_id: &str);
    fn reject(&self, session_id: &str);
    fn hangup(&self, session_id: &str);
    /// Session currently ringing, if any
    fn ring_session_id(&self) -> Option<String>;
    /// Session currently in the foreground, if any
    fn active_session_id(&self) -> Option<String>;
    fn sessions(&self) -> Vec<CallSession>;
}

/// Dialer page
#[cfg_attr(test, automock)]
pub trait DialerUi: Send + Sync {
    fn set_to_number_field(&self, phone_number: &str);
    fn call(&self, phone_number: &str);
}

/// SMS compose page
#[cfg_attr(test, automock)]
pub trait ComposeText: Send + Sync {
    fn update_typing_to_number(&self, phone_number: &str);
}

/// Region used to normalize dialed numbers
#[cfg_attr(test, automock)]
pub trait RegionSettings: Send + Sync {
    /// ISO 3166 alpha-2 code, e.g. `US`
    fn country_code(&self) -> String;
    /// Default area code for local numbers, may be empty
    fn area_code(&self) -> String;
}

/// Call module state
#[cfg_attr(test, automock)]
pub trait CallMonitor: Send + Sync {
    /// No call is being placed right now
    fn is_idle(&self) -> bool;
}

/// In-widget navigation
#[cfg_attr(test, automock)]
pub trait RouterInteraction: Send + Sync {
    fn push(&self, route: &str);
}

/// Widget locale
#[cfg_attr(test, automock)]
pub trait Locale: Send + Sync {
    fn current_locale(&self) -> String;
}

/// The page hosting the widget and its parent frame
#[cfg_attr(test, automock)]
pub trait HostWindow: Send + Sync {
    /// Post a message to the parent frame
    fn post_message(&self, message: &OutboundMessage, target_origin: &str) -> AdapterResult<()>;
    /// Flip between production and sandbox environments. Returns `false`
    /// when the page exposes no toggle.
    fn toggle_environment(&self) -> bool;
    /// Add a stylesheet link to the page head
    fn insert_stylesheet(&self, href: &str);
    /// Open a URL in a new browser tab
    fn open_window(&self, url: &str);
}

/// Everything the adapter talks to
#[derive(Clone)]
pub struct AdapterDeps {
    pub auth: Arc<dyn Auth>,
    pub presence: Arc<dyn Presence>,
    pub webphone: Arc<dyn Webphone>,
    pub dialer_ui: Arc<dyn DialerUi>,
    pub compose_text: Arc<dyn ComposeText>,
    pub region_settings: Arc<dyn RegionSettings>,
    pub call: Arc<dyn CallMonitor>,
    pub router: Arc<dyn RouterInteraction>,
    pub locale: Arc<dyn Locale>,
    pub host: Arc<dyn HostWindow>,
}
