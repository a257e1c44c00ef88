//! HUD Formatting
//!
//! Turns snapshots into display strings. The engine only reports raw
//! seconds and counters; formatting is the host's job.

use crate::game::ability::ABILITY_ENERGY_COST;
use crate::game::character::{CharacterSelection, Faction};
use crate::game::objectives::objective_for;
use crate::game::state::SessionStateView;

/// Format elapsed seconds as `m:ss`.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Button label for a 0-based ability index.
///
/// Unlike the event log, the HUD falls back to a numbered label.
pub fn ability_label(faction: Faction, index: usize) -> String {
    faction
        .ability_names()
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Ability {}", index + 1))
}

/// Whether ability buttons should be enabled.
pub fn can_use_ability(view: &SessionStateView) -> bool {
    !view.paused && view.energy >= ABILITY_ENERGY_COST
}

/// Plain-text HUD for a snapshot.
pub fn render_hud(selection: &CharacterSelection, view: &SessionStateView) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} [{}]  {}",
        selection.name,
        selection.faction.as_str(),
        if view.paused { "PAUSED" } else { "ACTIVE" }
    ));
    lines.push(format!(
        "Health {}%  Energy {}%  Score {}  Coins {}  Time {}",
        view.health,
        view.energy,
        view.score,
        view.coins,
        format_elapsed(view.elapsed_seconds)
    ));

    let ready = can_use_ability(view);
    let abilities: Vec<String> = view
        .ability_uses
        .iter()
        .map(|(slot, uses)| {
            let label = match usize::from(slot).checked_sub(1) {
                Some(index) => ability_label(selection.faction, index),
                None => format!("Ability {}", slot),
            };
            if ready {
                format!("{} x{}", label, uses)
            } else {
                format!("({}) x{}", label, uses)
            }
        })
        .collect();
    lines.push(abilities.join(" | "));

    let objective = objective_for(selection.faction);
    let progress = objective.progress(&view.ability_uses);
    lines.push(format!(
        "{}: {} {}/{}",
        objective.headline, objective.task, progress.current, progress.target
    ));

    if view.event_log.is_empty() {
        lines.push("No events yet...".to_string());
    } else {
        lines.extend(view.event_log.iter().map(|event| format!("- {}", event)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(9), "0:09");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[test]
    fn test_ability_label_fallback() {
        assert_eq!(ability_label(Faction::Police, 0), "Deploy Barrier");
        assert_eq!(ability_label(Faction::Police, 4), "Ability 5");
    }

    #[test]
    fn test_can_use_ability() {
        let mut view = SessionStateView::default();
        assert!(can_use_ability(&view));
        view.energy = 19;
        assert!(!can_use_ability(&view));
        view.energy = 100;
        view.paused = true;
        assert!(!can_use_ability(&view));
    }

    #[test]
    fn test_render_hud() {
        let selection = CharacterSelection::new(
            "shadow-goon",
            "Shadow Reaper",
            Faction::Goon,
            ["a", "b", "c", "d"],
        );
        let mut view = SessionStateView::default();
        view.elapsed_seconds = 75;

        let lines = render_hud(&selection, &view);
        assert_eq!(lines[0], "Shadow Reaper [goon]  ACTIVE");
        assert!(lines[1].ends_with("Time 1:15"));
        assert!(lines[2].starts_with("Stealth Strike x0"));
        assert_eq!(lines[3], "Create chaos: Loot items 0/10");
        assert_eq!(lines[4], "No events yet...");
    }
}
