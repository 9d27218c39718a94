//! Adapter state: panel geometry, presence and module lifecycle

use serde::{Deserialize, Serialize};

/// Widget panel size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 300,
            height: 500,
        }
    }
}

/// Panel drag offset relative to its docked position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub translate_x: i32,
    pub translate_y: i32,
    #[serde(default)]
    pub min_translate_x: i32,
    #[serde(default)]
    pub min_translate_y: i32,
}

/// Telephony status reported by the presence service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TelephonyStatus {
    NoCall,
    CallConnected,
    Ringing,
    OnHold,
    ParkedCall,
}

/// User availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Offline,
    Busy,
    Available,
}

/// Do-not-disturb mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DndStatus {
    TakeAllCalls,
    DoNotAcceptAnyCalls,
    DoNotAcceptDepartmentCalls,
    TakeDepartmentCallsOnly,
}

/// The three presence fields the host frame is told about
///
/// Missing values serialize as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceStatus {
    pub telephony_status: Option<TelephonyStatus>,
    pub user_status: Option<UserStatus>,
    pub dnd_status: Option<DndStatus>,
}

/// Lifecycle of the adapter module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleStatus {
    #[default]
    Pending,
    Initializing,
    Ready,
}

/// Panel state owned by the adapter and updated from base host messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub status: ModuleStatus,
    pub size: Size,
    pub minimized: bool,
    pub closed: bool,
    pub position: Position,
}

/// Full state snapshot pushed to the host frame once the adapter is ready
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterState {
    pub size: Size,
    pub minimized: bool,
    pub closed: bool,
    pub position: Position,
    pub telephony_status: Option<TelephonyStatus>,
    pub user_status: Option<UserStatus>,
    pub dnd_status: Option<DndStatus>,
}

impl AdapterState {
    /// Combine panel geometry with the (already login-gated) presence
    pub fn compose(panel: &PanelState, presence: PresenceStatus) -> Self {
        Self {
            size: panel.size,
            minimized: panel.minimized,
            closed: panel.closed,
            position: panel.position,
            telephony_status: presence.telephony_status,
            user_status: presence.user_status,
            dnd_status: presence.dnd_status,
        }
    }
}
