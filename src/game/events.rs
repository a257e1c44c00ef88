//! Session Notices
//!
//! Transient, user-facing messages raised by transitions. Advisory only:
//! they are never stored in session state.

use serde::{Serialize, Deserialize};

use crate::game::character::Difficulty;

/// How a notice should be presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Informational.
    #[default]
    Info,
    /// Something the player tried did not happen.
    Destructive,
}

/// Notice payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticeKind {
    /// Session started.
    SessionStarted {
        /// Character name.
        character: String,
        /// Chosen difficulty.
        difficulty: Difficulty,
    },
    /// An ability went off.
    AbilityActivated {
        /// Character name.
        character: String,
        /// Resolved ability name.
        ability: String,
    },
    /// Not enough energy for an ability.
    InsufficientEnergy {
        /// Energy at the time of the attempt.
        energy: u8,
        /// Energy the ability needs.
        required: u8,
    },
    /// Session paused.
    Paused,
    /// Session resumed.
    Resumed,
    /// Session reset to defaults.
    Restarted,
}

/// A transient message for the host to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Presentation level.
    pub level: NoticeLevel,
    /// What happened.
    #[serde(flatten)]
    pub kind: NoticeKind,
}

impl Notice {
    fn info(kind: NoticeKind) -> Self {
        Self { level: NoticeLevel::Info, kind }
    }

    /// Session start notice.
    pub fn session_started(character: &str, difficulty: Difficulty) -> Self {
        Self::info(NoticeKind::SessionStarted {
            character: character.to_string(),
            difficulty,
        })
    }

    /// Ability activation notice.
    pub fn ability_activated(character: &str, ability: &str) -> Self {
        Self::info(NoticeKind::AbilityActivated {
            character: character.to_string(),
            ability: ability.to_string(),
        })
    }

    /// Insufficient energy warning.
    pub fn insufficient_energy(energy: u8, required: u8) -> Self {
        Self {
            level: NoticeLevel::Destructive,
            kind: NoticeKind::InsufficientEnergy { energy, required },
        }
    }

    /// Pause notice.
    pub fn paused() -> Self {
        Self::info(NoticeKind::Paused)
    }

    /// Resume notice.
    pub fn resumed() -> Self {
        Self::info(NoticeKind::Resumed)
    }

    /// Reset notice.
    pub fn restarted() -> Self {
        Self::info(NoticeKind::Restarted)
    }

    /// Short headline.
    pub fn title(&self) -> String {
        match &self.kind {
            NoticeKind::SessionStarted { .. } => "Entering the Battlefield!".to_string(),
            NoticeKind::AbilityActivated { ability, .. } => format!("{} Activated!", ability),
            NoticeKind::InsufficientEnergy { .. } => "Not Enough Energy!".to_string(),
            NoticeKind::Paused => "Game Paused".to_string(),
            NoticeKind::Resumed => "Game Resumed".to_string(),
            NoticeKind::Restarted => "Game Restarted".to_string(),
        }
    }

    /// One-line detail.
    pub fn description(&self) -> String {
        match &self.kind {
            NoticeKind::SessionStarted { character, difficulty } => format!(
                "{} is ready for action on {} difficulty.",
                character,
                difficulty.as_str()
            ),
            NoticeKind::AbilityActivated { character, ability } => {
                format!("{} successfully used {}.", character, ability)
            }
            NoticeKind::InsufficientEnergy { .. } => {
                "Wait for energy to recharge before using abilities.".to_string()
            }
            NoticeKind::Paused => "Game paused successfully".to_string(),
            NoticeKind::Resumed => "Back to action!".to_string(),
            NoticeKind::Restarted => "Fresh start! Good luck warrior!".to_string(),
        }
    }
}
