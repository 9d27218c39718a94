//! Diff-and-notify cache for values mirrored to the host frame

use crate::collaborators::{Auth, Presence};
use crate::state::PresenceStatus;

/// Read presence as the host should see it: everything is `None` while the
/// user is logged out.
pub fn visible_presence(auth: &dyn Auth, presence: &dyn Presence) -> PresenceStatus {
    if !auth.logged_in() {
        return PresenceStatus::default();
    }
    PresenceStatus {
        telephony_status: presence.telephony_status(),
        user_status: presence.user_status(),
        dnd_status: presence.dnd_status(),
    }
}

/// Read presence regardless of login state
pub fn raw_presence(presence: &dyn Presence) -> PresenceStatus {
    PresenceStatus {
        telephony_status: presence.telephony_status(),
        user_status: presence.user_status(),
        dnd_status: presence.dnd_status(),
    }
}

/// Values last mirrored to the host frame
///
/// Both fields start unset so the first comparison after the adapter becomes
/// ready always counts as a change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishedState {
    presence: Option<PresenceStatus>,
    locale: Option<String>,
}

impl PublishedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` and report whether it differs from the last value
    pub fn update_presence(&mut self, current: PresenceStatus) -> bool {
        if self.presence == Some(current) {
            return false;
        }
        self.presence = Some(current);
        true
    }

    /// Record `current` and report whether it differs from the last value
    pub fn update_locale(&mut self, current: &str) -> bool {
        if self.locale.as_deref() == Some(current) {
            return false;
        }
        self.locale = Some(current.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockAuth, MockPresence};
    use crate::state::{DndStatus, TelephonyStatus, UserStatus};

    fn presence_mock() -> MockPresence {
        let mut presence = MockPresence::new();
        presence
            .expect_telephony_status()
            .returning(|| Some(TelephonyStatus::CallConnected));
        presence.expect_user_status().returning(|| Some(UserStatus::Busy));
        presence.expect_dnd_status().returning(|| Some(DndStatus::TakeAllCalls));
        presence
    }

    #[test]
    fn test_logged_out_hides_presence() {
        let mut auth = MockAuth::new();
        auth.expect_logged_in().return_const(false);
        let presence = MockPresence::new();

        assert_eq!(visible_presence(&auth, &presence), PresenceStatus::default());
    }

    #[test]
    fn test_logged_in_reads_presence() {
        let mut auth = MockAuth::new();
        auth.expect_logged_in().return_const(true);
        let presence = presence_mock();

        let visible = visible_presence(&auth, &presence);
        assert_eq!(visible.telephony_status, Some(TelephonyStatus::CallConnected));
        assert_eq!(visible, raw_presence(&presence));
    }

    #[test]
    fn test_first_update_always_counts() {
        let mut published = PublishedState::new();
        assert!(published.update_presence(PresenceStatus::default()));
        assert!(!published.update_presence(PresenceStatus::default()));

        let changed = PresenceStatus {
            user_status: Some(UserStatus::Available),
            ..Default::default()
        };
        assert!(published.update_presence(changed));
        assert!(!published.update_presence(changed));
    }

    #[test]
    fn test_locale_diff() {
        let mut published = PublishedState::new();
        assert!(published.update_locale("en-US"));
        assert!(!published.update_locale("en-US"));
        assert!(published.update_locale("fr-FR"));
        assert!(!published.update_locale("fr-FR"));
        assert!(published.update_locale("en-US"));
    }
}
