//! Mission Objectives
//!
//! One tracked objective per faction, driven by ability use counts.

use serde::Serialize;

use crate::game::character::Faction;
use crate::game::state::AbilityUses;

/// A faction's mission objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Objective {
    /// Headline goal.
    pub headline: &'static str,
    /// Counted task.
    pub task: &'static str,
    /// Ability slot whose uses count toward the task.
    pub slot: u8,
    /// Uses needed.
    pub target: u32,
}

/// Progress toward an objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectiveProgress {
    /// Uses so far.
    pub current: u32,
    /// Uses needed.
    pub target: u32,
}

impl ObjectiveProgress {
    /// Whether the target has been reached.
    pub fn complete(&self) -> bool {
        self.current >= self.target
    }
}

/// Objective for a faction.
pub fn objective_for(faction: Faction) -> Objective {
    match faction {
        Faction::Police => Objective {
            headline: "Control riot zones",
            task: "Deploy barriers",
            slot: 1,
            target: 5,
        },
        Faction::Protester => Objective {
            headline: "Spread awareness",
            task: "Rally supporters",
            slot: 1,
            target: 3,
        },
        Faction::Goon => Objective {
            headline: "Create chaos",
            task: "Loot items",
            slot: 3,
            target: 10,
        },
    }
}

impl Objective {
    /// Progress given the session's ability uses.
    ///
    /// Counts past the target are reported as-is, matching the HUD's
    /// "7/5" style readout.
    pub fn progress(&self, uses: &AbilityUses) -> ObjectiveProgress {
        ObjectiveProgress {
            current: uses.get(self.slot),
            target: self.target,
        }
    }
}
