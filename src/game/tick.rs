//! Session Clock Tick
//!
//! One tick is one second of play. Ticks only move the clock; they never
//! touch resources.

use crate::game::state::SessionState;

/// Result of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the clock moved.
    pub advanced: bool,
    /// Elapsed seconds after the tick.
    pub elapsed_seconds: u32,
}

/// Run one clock tick. A paused session is left exactly as it was.
pub fn tick(state: &mut SessionState) -> TickResult {
    if state.paused {
        return TickResult {
            advanced: false,
            elapsed_seconds: state.elapsed_seconds,
        };
    }

    state.elapsed_seconds = state.elapsed_seconds.saturating_add(1);

    TickResult {
        advanced: true,
        elapsed_seconds: state.elapsed_seconds,
    }
}
