//! Conference invite button that hands off to a web calendar
//!
//! The button only opens the calendar page; the event itself is logged and
//! not transmitted anywhere.

use serde::Serialize;
use tracing::info;

use crate::collaborators::HostWindow;

/// Button label
pub const INVITE_BUTTON_LABEL: &str = "Invite with Office 365 Calendar";

/// Topic given to every conference invite
pub const CONFERENCE_TOPIC: &str = "New Conference";

/// Invite handed to the calendar page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub invite_text: String,
    pub dial_in_number: String,
    pub topic: String,
}

/// Log `event` and open the calendar page at `calendar_url`
pub fn open_calendar_page(host: &dyn HostWindow, calendar_url: &str, event: &CalendarEvent) {
    info!(
        topic = %event.topic,
        dial_in_number = %event.dial_in_number,
        invite_text = %event.invite_text,
        "opening calendar page"
    );
    host.open_window(calendar_url);
}

/// Conference panel button. The invite text is fetched lazily on click.
pub struct CalendarInviteButton<F>
where
    F: Fn() -> String,
{
    dial_in_number: String,
    calendar_url: String,
    invite_text: F,
}

impl<F> CalendarInviteButton<F>
where
    F: Fn() -> String,
{
    pub fn new(dial_in_number: impl Into<String>, calendar_url: impl Into<String>, invite_text: F) -> Self {
        Self {
            dial_in_number: dial_in_number.into(),
            calendar_url: calendar_url.into(),
            invite_text,
        }
    }

    pub fn label(&self) -> &'static str {
        INVITE_BUTTON_LABEL
    }

    /// Click handler. Returns whether the calendar page was opened.
    pub fn on_invite(&self, host: &dyn HostWindow) -> bool {
        let invite_text = (self.invite_text)();
        if invite_text.is_empty() {
            return false;
        }
        let event = CalendarEvent {
            invite_text,
            dial_in_number: self.dial_in_number.clone(),
            topic: CONFERENCE_TOPIC.to_string(),
        };
        open_calendar_page(host, &self.calendar_url, &event);
        true
    }
}
