//! Session State Definitions
//!
//! The per-session mutable state, its bounded event log, and the read-only
//! view handed out to the host. Uses BTreeMap for ordered ability slots.

use std::collections::{BTreeMap, VecDeque};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::game::character::ABILITY_SLOTS;

/// Upper bound for health.
pub const MAX_HEALTH: u8 = 100;

/// Upper bound for energy.
pub const MAX_ENERGY: u8 = 100;

/// Level every session starts at.
pub const STARTING_LEVEL: u32 = 1;

/// Maximum number of entries kept in the event log.
pub const EVENT_LOG_CAPACITY: usize = 5;

// =============================================================================
// ABILITY USES
// =============================================================================

/// Use counters keyed by ability slot (1..=4).
///
/// Every slot is always present, starting at zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AbilityUses(BTreeMap<u8, u32>);

impl AbilityUses {
    /// All slots at zero.
    pub fn new() -> Self {
        Self((1..=ABILITY_SLOTS as u8).map(|slot| (slot, 0)).collect())
    }

    /// Uses recorded for a slot (zero for unknown slots).
    pub fn get(&self, slot: u8) -> u32 {
        self.0.get(&slot).copied().unwrap_or(0)
    }

    /// Record one use. Returns false if the slot does not exist.
    pub fn record(&mut self, slot: u8) -> bool {
        match self.0.get_mut(&slot) {
            Some(count) => {
                *count = count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Sum over all slots.
    pub fn total(&self) -> u32 {
        self.0.values().fold(0u32, |acc, count| acc.saturating_add(*count))
    }

    /// Iterate `(slot, uses)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0.iter().map(|(slot, count)| (*slot, *count))
    }
}

impl Default for AbilityUses {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for AbilityUses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slots = BTreeMap::<u8, u32>::deserialize(deserializer)?;
        if !slots.keys().copied().eq(1..=ABILITY_SLOTS as u8) {
            return Err(de::Error::custom(format!(
                "ability uses must have exactly slots 1..={}",
                ABILITY_SLOTS
            )));
        }
        Ok(Self(slots))
    }
}

// =============================================================================
// EVENT LOG
// =============================================================================

/// Most-recent-first log of event lines, capped at [`EVENT_LOG_CAPACITY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventLog(VecDeque<String>);

impl<'de> Deserialize<'de> for EventLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = VecDeque::<String>::deserialize(deserializer)?;
        if lines.len() > EVENT_LOG_CAPACITY {
            return Err(de::Error::invalid_length(
                lines.len(),
                &"at most five event log entries",
            ));
        }
        Ok(Self(lines))
    }
}

impl EventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self(VecDeque::with_capacity(EVENT_LOG_CAPACITY))
    }

    /// Put a line at the front, dropping the oldest past capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push_front(line.into());
        self.0.truncate(EVENT_LOG_CAPACITY);
    }

    /// Newest entry.
    pub fn latest(&self) -> Option<&str> {
        self.0.front().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Mutable state of one session. Owned by the engine only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Health, 0..=100. No rule currently lowers it.
    pub health: u8,
    /// Energy, 0..=100.
    pub energy: u8,
    /// Score, never decreases except on reset.
    pub score: u32,
    /// Coins, never decrease except on reset.
    pub coins: u32,
    /// Level. Fixed at start.
    pub level: u32,
    /// Seconds of unpaused play.
    pub elapsed_seconds: u32,
    /// Whether the session is paused.
    pub paused: bool,
    /// Ability use counters.
    pub ability_uses: AbilityUses,
    /// Recent events.
    pub event_log: EventLog,
}

impl SessionState {
    /// Fresh state with session-start defaults.
    pub fn new() -> Self {
        Self {
            health: MAX_HEALTH,
            energy: MAX_ENERGY,
            score: 0,
            coins: 0,
            level: STARTING_LEVEL,
            elapsed_seconds: 0,
            paused: false,
            ability_uses: AbilityUses::new(),
            event_log: EventLog::new(),
        }
    }

    /// Add energy, clamped to [`MAX_ENERGY`].
    pub fn gain_energy(&mut self, amount: u8) {
        self.energy = self.energy.saturating_add(amount).min(MAX_ENERGY);
    }

    /// Spend energy, floored at zero.
    pub fn spend_energy(&mut self, amount: u8) {
        self.energy = self.energy.saturating_sub(amount);
    }

    /// Add score.
    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Add coins.
    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Check the resource bounds hold.
    pub fn within_bounds(&self) -> bool {
        self.health <= MAX_HEALTH
            && self.energy <= MAX_ENERGY
            && self.event_log.len() <= EVENT_LOG_CAPACITY
            && self.level >= 1
    }

    /// Read-only copy for display.
    pub fn view(&self) -> SessionStateView {
        SessionStateView {
            health: self.health,
            energy: self.energy,
            score: self.score,
            coins: self.coins,
            level: self.level,
            elapsed_seconds: self.elapsed_seconds,
            paused: self.paused,
            ability_uses: self.ability_uses.clone(),
            event_log: self.event_log.clone(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of a session's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateView {
    /// Health, 0..=100.
    pub health: u8,
    /// Energy, 0..=100.
    pub energy: u8,
    /// Score.
    pub score: u32,
    /// Coins.
    pub coins: u32,
    /// Level.
    pub level: u32,
    /// Seconds of unpaused play.
    pub elapsed_seconds: u32,
    /// Whether the session is paused.
    pub paused: bool,
    /// Ability use counters.
    pub ability_uses: AbilityUses,
    /// Recent events, newest first.
    pub event_log: EventLog,
}

impl Default for SessionStateView {
    fn default() -> Self {
        SessionState::new().view()
    }
}
