//! Session Host Layer
//!
//! Async plumbing around the engine: one actor task per session, a scoped
//! tick source, and a registry of live sessions.
//! This layer is **non-deterministic** - all rules live in `game/`.

pub mod config;
pub mod protocol;
pub mod clock;
pub mod handle;
pub mod manager;
pub mod hud;

use crate::game::session::SessionError;

pub use config::SessionConfig;
pub use protocol::{SessionCommand, HostEvent};
pub use clock::TickSource;
pub use handle::{SessionHandle, SessionId};
pub use manager::{SessionManager, SessionInfo};
pub use hud::{format_elapsed, ability_label, can_use_ability, render_hud};

/// Host errors.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Engine rejected the request.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Session actor has shut down.
    #[error("Session closed")]
    Closed,

    /// No session with that id.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// Malformed command.
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
}

/// Short hex prefix of a session id, for log lines.
pub fn short_id(id: &SessionId) -> String {
    hex::encode(&id.as_bytes()[..4])
}
