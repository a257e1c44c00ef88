//! Faction Abilities
//!
//! Each character has four ability slots. Using one costs energy and bumps
//! the slot's use counter; the name comes from the faction table.

use crate::game::character::CharacterSelection;
use crate::game::session::SessionError;
use crate::game::state::SessionState;

/// Energy an ability costs, and the minimum needed to use one.
pub const ABILITY_ENERGY_COST: u8 = 20;

/// A successful ability use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityActivation {
    /// Slot that was used.
    pub slot: u8,
    /// Resolved ability name.
    pub ability: &'static str,
    /// Energy left afterwards.
    pub energy_left: u8,
}

/// Check whether an ability can be used right now.
#[inline]
pub fn ability_ready(state: &SessionState) -> bool {
    !state.paused && state.energy >= ABILITY_ENERGY_COST
}

/// Use the ability in `slot`.
///
/// Returns `Ok(None)` when paused (silently ignored), and
/// [`SessionError::InsufficientEnergy`] without touching state when energy
/// is below [`ABILITY_ENERGY_COST`]. An out-of-range slot still spends
/// energy and logs the generic ability name, but moves no counter.
pub fn activate_ability(
    state: &mut SessionState,
    character: &CharacterSelection,
    slot: u8,
) -> Result<Option<AbilityActivation>, SessionError> {
    if state.paused {
        return Ok(None);
    }

    if state.energy < ABILITY_ENERGY_COST {
        return Err(SessionError::InsufficientEnergy {
            energy: state.energy,
            required: ABILITY_ENERGY_COST,
        });
    }

    let ability = character.faction.ability_name(slot);

    state.spend_energy(ABILITY_ENERGY_COST);
    state.ability_uses.record(slot);
    state
        .event_log
        .push(format!("{} used {}!", character.name, ability));

    Ok(Some(AbilityActivation {
        slot,
        ability,
        energy_left: state.energy,
    }))
}
