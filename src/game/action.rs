//! Movement and Combat Actions
//!
//! Fixed reward table for the four basic actions.

use serde::{Serialize, Deserialize};

use crate::game::state::SessionState;

/// Energy regenerated by every accepted action.
pub const PASSIVE_ENERGY_REGEN: u8 = 1;

/// A basic player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Jump over an obstacle.
    Jump,
    /// Duck under a projectile.
    Duck,
    /// Attack.
    Attack,
    /// Pick up an item.
    Collect,
}

/// What an action is worth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    /// Score gained.
    pub score: u32,
    /// Coins gained.
    pub coins: u32,
}

impl ActionKind {
    /// All actions, in HUD button order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Jump,
        ActionKind::Duck,
        ActionKind::Attack,
        ActionKind::Collect,
    ];

    /// Reward table.
    pub fn reward(self) -> Reward {
        match self {
            ActionKind::Jump => Reward { score: 10, coins: 0 },
            ActionKind::Duck => Reward { score: 15, coins: 0 },
            ActionKind::Attack => Reward { score: 25, coins: 0 },
            ActionKind::Collect => Reward { score: 5, coins: 1 },
        }
    }

    /// Past-tense phrase that follows the character name in the log.
    pub fn log_phrase(self) -> &'static str {
        match self {
            ActionKind::Jump => "jumped over obstacle",
            ActionKind::Duck => "ducked to avoid projectile",
            ActionKind::Attack => "attacked successfully",
            ActionKind::Collect => "collected item",
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Jump => "jump",
            ActionKind::Duck => "duck",
            ActionKind::Attack => "attack",
            ActionKind::Collect => "collect",
        }
    }

    /// Parse from a (case-insensitive) name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jump" => Some(ActionKind::Jump),
            "duck" => Some(ActionKind::Duck),
            "attack" => Some(ActionKind::Attack),
            "collect" => Some(ActionKind::Collect),
            _ => None,
        }
    }
}

/// Apply an action to a running session.
///
/// Returns false, touching nothing, when the session is paused.
pub fn apply_action(state: &mut SessionState, character: &str, kind: ActionKind) -> bool {
    if state.paused {
        return false;
    }

    let reward = kind.reward();
    state.add_score(reward.score);
    state.add_coins(reward.coins);
    state.gain_energy(PASSIVE_ENERGY_REGEN);
    state
        .event_log
        .push(format!("{} {}!", character, kind.log_phrase()));

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_table() {
        assert_eq!(ActionKind::Jump.reward(), Reward { score: 10, coins: 0 });
        assert_eq!(ActionKind::Duck.reward(), Reward { score: 15, coins: 0 });
        assert_eq!(ActionKind::Attack.reward(), Reward { score: 25, coins: 0 });
        assert_eq!(ActionKind::Collect.reward(), Reward { score: 5, coins: 1 });
    }

    #[test]
    fn test_action_logs_and_regens() {
        let mut state = SessionState::new();
        state.energy = 50;

        assert!(apply_action(&mut state, "Captain Steel", ActionKind::Attack));
        assert_eq!(state.score, 25);
        assert_eq!(state.energy, 51);
        assert_eq!(state.event_log.latest(), Some("Captain Steel attacked successfully!"));
    }

    #[test]
    fn test_collect_four_times() {
        let mut state = SessionState::new();
        for _ in 0..4 {
            apply_action(&mut state, "X", ActionKind::Collect);
        }
        assert_eq!(state.score, 20);
        assert_eq!(state.coins, 4);
        assert_eq!(state.energy, 100);
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_paused_action_is_silent() {
        let mut state = SessionState::new();
        state.paused = true;
        state.energy = 40;
        let before = state.clone();

        assert!(!apply_action(&mut state, "X", ActionKind::Jump));
        assert_eq!(state, before);
    }

    #[test]
    fn test_action_names() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ActionKind::from_name("JUMP"), Some(ActionKind::Jump));
        assert_eq!(ActionKind::from_name("fly"), None);
    }
}
