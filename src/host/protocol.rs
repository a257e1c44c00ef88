//! Host Protocol
//!
//! Commands into a session and events out of it. JSON, one message per
//! line, so a host can script or replay a session.

use serde::{Serialize, Deserialize};

use crate::game::action::ActionKind;
use crate::game::events::Notice;
use crate::game::state::SessionStateView;

// =============================================================================
// HOST -> ENGINE
// =============================================================================

/// A request to change a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Basic action.
    Action {
        /// Which action.
        kind: ActionKind,
    },
    /// Ability in slot 1..=4.
    UseAbility {
        /// Ability slot.
        slot: u8,
    },
    /// Pause.
    Pause,
    /// Resume.
    Resume,
    /// Flip paused/running.
    TogglePause,
    /// Back to defaults.
    Reset,
    /// One clock tick.
    Tick,
}

impl SessionCommand {
    /// Parse a command from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Action { .. } => "action",
            SessionCommand::UseAbility { .. } => "use_ability",
            SessionCommand::Pause => "pause",
            SessionCommand::Resume => "resume",
            SessionCommand::TogglePause => "toggle_pause",
            SessionCommand::Reset => "reset",
            SessionCommand::Tick => "tick",
        }
    }
}

// =============================================================================
// ENGINE -> HOST
// =============================================================================

/// Something the host should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Fresh state snapshot.
    State(SessionStateView),
    /// Transient message.
    Notice(Notice),
}

impl HostEvent {
    /// Serialize to a JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
