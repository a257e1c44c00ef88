//! Session Engine Module
//!
//! All session rules. Synchronous, no I/O, no clocks of its own.
//!
//! ## Module Structure
//!
//! - `character`: Factions, difficulty, selection, roster
//! - `state`: Session state, event log, snapshot view
//! - `action`: Basic actions and their reward table
//! - `ability`: Faction abilities and energy cost
//! - `tick`: One-second clock tick
//! - `objectives`: Per-faction mission objectives
//! - `events`: Advisory notices for the host
//! - `session`: Engine facade tying the above together

pub mod character;
pub mod state;
pub mod action;
pub mod ability;
pub mod tick;
pub mod objectives;
pub mod events;
pub mod session;

// Re-export key types
pub use character::{CharacterSelection, CharacterProfile, Difficulty, Faction};
pub use state::{SessionState, SessionStateView, AbilityUses, EventLog};
pub use action::ActionKind;
pub use tick::TickResult;
pub use events::{Notice, NoticeKind, NoticeLevel};
pub use session::{Session, SessionError, Transition};
