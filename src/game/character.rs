//! Characters, Factions and Difficulty
//!
//! The selection record handed to the engine at session start, the static
//! character roster, and the per-faction ability name table.

use serde::{Deserialize, Serialize};

use crate::game::session::SessionError;

/// Number of ability slots every character carries.
pub const ABILITY_SLOTS: usize = 4;

/// Label used in the event log when a slot has no faction ability name.
pub const GENERIC_ABILITY_NAME: &str = "Special Ability";

// =============================================================================
// FACTION
// =============================================================================

/// Character faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Riot control.
    Police,
    /// Street protesters.
    Protester,
    /// Opportunistic troublemakers.
    Goon,
}

/// Ability names by faction, indexed by slot - 1.
const POLICE_ABILITIES: [&str; ABILITY_SLOTS] =
    ["Deploy Barrier", "Launch Tear Gas", "Call Backup", "Vehicle Chase"];
const PROTESTER_ABILITIES: [&str; ABILITY_SLOTS] =
    ["Rally Cry", "Sign Shield", "Stone Throw", "Parkour Escape"];
const GOON_ABILITIES: [&str; ABILITY_SLOTS] =
    ["Stealth Strike", "Create Chaos", "Loot", "Intimidate"];

impl Faction {
    /// Static ability name table for this faction.
    pub fn ability_names(self) -> &'static [&'static str; ABILITY_SLOTS] {
        match self {
            Faction::Police => &POLICE_ABILITIES,
            Faction::Protester => &PROTESTER_ABILITIES,
            Faction::Goon => &GOON_ABILITIES,
        }
    }

    /// Ability name at a 1-based slot.
    ///
    /// Slots outside 1..=4 resolve to [`GENERIC_ABILITY_NAME`] instead of
    /// failing, so a bad slot still produces a readable log line.
    pub fn ability_name(self, slot: u8) -> &'static str {
        (slot as usize)
            .checked_sub(1)
            .and_then(|index| self.ability_names().get(index))
            .copied()
            .unwrap_or(GENERIC_ABILITY_NAME)
    }

    /// Lowercase name, as shown on the HUD badge.
    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Police => "police",
            Faction::Protester => "protester",
            Faction::Goon => "goon",
        }
    }

    /// Parse from a (case-insensitive) name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "police" => Some(Faction::Police),
            "protester" => Some(Faction::Protester),
            "goon" => Some(Faction::Goon),
            _ => None,
        }
    }
}

// =============================================================================
// DIFFICULTY
// =============================================================================

/// Session difficulty. Carried as metadata; no rule reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Normal.
    #[default]
    Normal,
    /// Hard.
    Hard,
    /// Nightmare.
    Nightmare,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }

    /// Parse from a (case-insensitive) name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "nightmare" => Some(Difficulty::Nightmare),
            _ => None,
        }
    }
}

// =============================================================================
// CHARACTER SELECTION
// =============================================================================

/// The character a session is played with. Immutable for the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSelection {
    /// Stable identifier.
    pub id: String,
    /// Display name used in log lines.
    pub name: String,
    /// Faction, which picks the ability name table.
    pub faction: Faction,
    /// The character's own ability list, exactly four entries.
    pub abilities: Vec<String>,
}

impl CharacterSelection {
    /// Build a selection.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        faction: Faction,
        abilities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            faction,
            abilities: abilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the selection is well formed.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.id.trim().is_empty() {
            return Err(SessionError::invalid_selection("character id is empty"));
        }
        if self.name.trim().is_empty() {
            return Err(SessionError::invalid_selection("character name is empty"));
        }
        if self.abilities.len() < ABILITY_SLOTS {
            return Err(SessionError::invalid_selection(format!(
                "expected {} abilities, got {}",
                ABILITY_SLOTS,
                self.abilities.len()
            )));
        }
        Ok(())
    }
}

// =============================================================================
// ROSTER
// =============================================================================

/// Rarity tier of a roster character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Common.
    Common,
    /// Rare.
    Rare,
    /// Legendary.
    Legendary,
}

/// Display stats, 0..=100 each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// Strength.
    pub strength: u8,
    /// Speed.
    pub speed: u8,
    /// Stealth.
    pub stealth: u8,
    /// Resistance.
    pub resistance: u8,
}

/// A character from the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CharacterProfile {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Faction.
    pub faction: Faction,
    /// Flavour text.
    pub description: &'static str,
    /// Profile ability list.
    pub abilities: [&'static str; ABILITY_SLOTS],
    /// Display stats.
    pub stats: CharacterStats,
    /// Whether the character can be picked.
    pub unlocked: bool,
    /// Rarity tier.
    pub rarity: Rarity,
}

impl CharacterProfile {
    /// Turn this profile into a selection for a new session.
    ///
    /// Locked characters cannot be selected.
    pub fn select(&self) -> Result<CharacterSelection, SessionError> {
        if !self.unlocked {
            return Err(SessionError::invalid_selection(format!(
                "character {} is locked",
                self.id
            )));
        }
        Ok(CharacterSelection::new(
            self.id,
            self.name,
            self.faction,
            self.abilities,
        ))
    }
}

static ROSTER: [CharacterProfile; 3] = [
    CharacterProfile {
        id: "police-captain",
        name: "Captain Steel",
        faction: Faction::Police,
        description: "Elite riot control officer with advanced tactical gear and leadership skills.",
        abilities: ["Barrier Deployment", "Tear Gas Launch", "Tactical Command", "Vehicle Chase"],
        stats: CharacterStats { strength: 85, speed: 70, stealth: 40, resistance: 95 },
        unlocked: true,
        rarity: Rarity::Rare,
    },
    CharacterProfile {
        id: "protester-leader",
        name: "Freedom Fighter",
        faction: Faction::Protester,
        description: "Charismatic leader rallying the masses for justice and change.",
        abilities: ["Rally Cry", "Sign Shield", "Stone Throw", "Parkour Escape"],
        stats: CharacterStats { strength: 60, speed: 90, stealth: 75, resistance: 70 },
        unlocked: true,
        rarity: Rarity::Common,
    },
    CharacterProfile {
        id: "shadow-goon",
        name: "Shadow Reaper",
        faction: Faction::Goon,
        description: "Mysterious operative with dark agenda and devastating combat skills.",
        abilities: ["Stealth Strike", "Chaos Creation", "Loot Master", "Intimidation"],
        stats: CharacterStats { strength: 95, speed: 80, stealth: 100, resistance: 60 },
        unlocked: false,
        rarity: Rarity::Legendary,
    },
];

/// The full character roster.
pub fn roster() -> &'static [CharacterProfile] {
    &ROSTER
}

/// Look up a roster character by id.
pub fn find_character(id: &str) -> Option<&'static CharacterProfile> {
    ROSTER.iter().find(|c| c.id == id)
}
