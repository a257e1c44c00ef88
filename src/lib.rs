//! # Riot Session
//!
//! Session engine for a single-player arcade brawler: resources, clock,
//! abilities and a short event log, plus the async host plumbing that
//! drives it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RIOT SESSION                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  game/             - Session engine (synchronous, no I/O)    │
//! │  ├── character.rs  - Factions, difficulty, roster            │
//! │  ├── state.rs      - Session state, event log, snapshots     │
//! │  ├── action.rs     - Jump/duck/attack/collect rewards        │
//! │  ├── ability.rs    - Faction abilities, energy cost          │
//! │  ├── tick.rs       - One-second clock tick                   │
//! │  ├── objectives.rs - Faction mission objectives              │
//! │  ├── events.rs     - Advisory notices                        │
//! │  └── session.rs    - Engine facade and state machine         │
//! │                                                              │
//! │  host/             - Host plumbing (async)                   │
//! │  ├── handle.rs     - Single-consumer session actor           │
//! │  ├── clock.rs      - Scoped tick source                      │
//! │  ├── manager.rs    - Live session registry                   │
//! │  ├── protocol.rs   - JSON commands and events                │
//! │  ├── config.rs     - Host configuration                      │
//! │  └── hud.rs        - Display formatting                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! All mutations of a hosted session (clock ticks, actions, abilities,
//! pause/resume, reset) are applied one at a time by the session's actor.
//! Health and energy stay within 0..=100 and the event log never holds
//! more than five entries after any transition.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod game;
pub mod host;

// Re-export commonly used types
pub use game::{
    ActionKind, CharacterSelection, Difficulty, Faction, Notice, Session, SessionError,
    SessionStateView, Transition,
};
pub use host::{HostError, SessionConfig, SessionHandle, SessionManager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clock period in milliseconds (one tick = one second of play)
pub const TICK_PERIOD_MS: u64 = 1000;
