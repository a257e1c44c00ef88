//! Session Engine
//!
//! Owns one session's state together with its immutable character and
//! difficulty, and applies every transition to it:
//!
//! ```text
//!            pause / toggle
//!   Running ───────────────→ Paused
//!      ↑  ←─────────────────   │
//!      │     resume / toggle   │
//!      └────── reset ──────────┘   (reset from either state)
//! ```
//!
//! Actions and abilities are accepted only while running. Ticks are no-ops
//! while paused. The engine is synchronous and does no I/O; callers that
//! share a session across tasks serialize access (see `host::handle`).

use tracing::debug;

use crate::game::ability::{activate_ability, AbilityActivation};
use crate::game::action::{apply_action, ActionKind};
use crate::game::character::{CharacterSelection, Difficulty};
use crate::game::events::Notice;
use crate::game::objectives::{objective_for, Objective, ObjectiveProgress};
use crate::game::state::{SessionState, SessionStateView};
use crate::game::tick::{tick, TickResult};

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Selection missing or malformed.
    #[error("Invalid selection: {reason}")]
    InvalidSelection {
        /// What was wrong.
        reason: String,
    },

    /// Not enough energy for an ability.
    #[error("Insufficient energy: have {energy}, need {required}")]
    InsufficientEnergy {
        /// Energy at the time of the attempt.
        energy: u8,
        /// Energy required.
        required: u8,
    },
}

impl SessionError {
    /// Build an [`SessionError::InvalidSelection`].
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        SessionError::InvalidSelection { reason: reason.into() }
    }
}

/// Outcome of a state-changing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Whether session state changed.
    pub changed: bool,
    /// Notice for the host to show, if any.
    pub notice: Option<Notice>,
}

impl Transition {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(notice: Option<Notice>) -> Self {
        Self { changed: true, notice }
    }
}

/// A running single-player session.
#[derive(Debug, Clone)]
pub struct Session {
    selection: CharacterSelection,
    difficulty: Difficulty,
    state: SessionState,
}

impl Session {
    /// Start a session.
    ///
    /// Fails with [`SessionError::InvalidSelection`] when no selection is
    /// given or it carries fewer than four abilities.
    pub fn start(
        selection: Option<CharacterSelection>,
        difficulty: Difficulty,
    ) -> Result<(Self, Notice), SessionError> {
        let selection = selection
            .ok_or_else(|| SessionError::invalid_selection("no character selected"))?;
        selection.validate()?;

        debug!(
            "Starting session for {} ({}) on {}",
            selection.name,
            selection.faction.as_str(),
            difficulty.as_str()
        );

        let notice = Notice::session_started(&selection.name, difficulty);
        Ok((
            Self {
                selection,
                difficulty,
                state: SessionState::new(),
            },
            notice,
        ))
    }

    /// Character this session is played with.
    pub fn selection(&self) -> &CharacterSelection {
        &self.selection
    }

    /// Difficulty chosen at start.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether the session is paused.
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> SessionStateView {
        self.state.view()
    }

    /// The faction objective and its progress.
    pub fn objective(&self) -> (Objective, ObjectiveProgress) {
        let objective = objective_for(self.selection.faction);
        let progress = objective.progress(&self.state.ability_uses);
        (objective, progress)
    }

    /// Put the state back to session-start defaults, keeping the character
    /// and difficulty. Resetting an already fresh session changes nothing.
    pub fn reset(&mut self) -> Transition {
        let fresh = SessionState::new();
        if self.state == fresh {
            return Transition::unchanged();
        }
        self.state = fresh;
        Transition::changed(Some(Notice::restarted()))
    }

    /// Pause. No-op if already paused.
    pub fn pause(&mut self) -> Transition {
        if self.state.paused {
            return Transition::unchanged();
        }
        self.state.paused = true;
        Transition::changed(Some(Notice::paused()))
    }

    /// Resume. No-op if already running.
    pub fn resume(&mut self) -> Transition {
        if !self.state.paused {
            return Transition::unchanged();
        }
        self.state.paused = false;
        Transition::changed(Some(Notice::resumed()))
    }

    /// Flip between paused and running.
    pub fn toggle_pause(&mut self) -> Transition {
        if self.state.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> TickResult {
        tick(&mut self.state)
    }

    /// Apply a basic action. Ignored while paused.
    pub fn action(&mut self, kind: ActionKind) -> Transition {
        if apply_action(&mut self.state, &self.selection.name, kind) {
            debug_assert!(self.state.within_bounds());
            Transition::changed(None)
        } else {
            debug!("Ignoring {} while paused", kind.as_str());
            Transition::unchanged()
        }
    }

    /// Use the ability in `slot` (1..=4).
    ///
    /// While paused this is a silent no-op. With too little energy it
    /// returns [`SessionError::InsufficientEnergy`] and leaves state alone.
    pub fn use_ability(&mut self, slot: u8) -> Result<Transition, SessionError> {
        match activate_ability(&mut self.state, &self.selection, slot)? {
            Some(AbilityActivation { ability, energy_left, .. }) => {
                debug!("{} used {} (energy {})", self.selection.name, ability, energy_left);
                debug_assert!(self.state.within_bounds());
                Ok(Transition::changed(Some(Notice::ability_activated(
                    &self.selection.name,
                    ability,
                ))))
            }
            None => {
                debug!("Ignoring ability slot {} while paused", slot);
                Ok(Transition::unchanged())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::character::{find_character, Faction};

    fn start_protester() -> Session {
        let selection = find_character("protester-leader").unwrap().select().unwrap();
        Session::start(Some(selection), Difficulty::Normal).unwrap().0
    }

    #[test]
    fn test_start_requires_selection() {
        let result = Session::start(None, Difficulty::Easy);
        assert!(matches!(result, Err(SessionError::InvalidSelection { .. })));
    }

    #[test]
    fn test_start_requires_four_abilities() {
        let selection = CharacterSelection::new("x", "X", Faction::Police, ["a", "b"]);
        assert!(Session::start(Some(selection), Difficulty::Hard).is_err());
    }

    #[test]
    fn test_start_emits_notice_and_defaults() {
        let selection = find_character("police-captain").unwrap().select().unwrap();
        let (session, notice) = Session::start(Some(selection), Difficulty::Nightmare).unwrap();

        assert_eq!(notice.title(), "Entering the Battlefield!");
        assert_eq!(session.difficulty(), Difficulty::Nightmare);
        assert_eq!(session.snapshot(), SessionStateView::default());
    }

    #[test]
    fn test_protester_rally_cry_scenario() {
        let mut session = start_protester();
        let transition = session.use_ability(1).unwrap();
        assert!(transition.changed);
        assert_eq!(transition.notice.unwrap().title(), "Rally Cry Activated!");

        let view = session.snapshot();
        assert_eq!(view.energy, 80);
        let uses: Vec<(u8, u32)> = view.ability_uses.iter().collect();
        assert_eq!(uses, vec![(1, 1), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(view.event_log.latest(), Some("Freedom Fighter used Rally Cry!"));
    }

    #[test]
    fn test_drain_energy_then_fail() {
        let mut session = start_protester();
        for _ in 0..5 {
            session.use_ability(2).unwrap();
        }
        assert_eq!(session.snapshot().energy, 0);

        let before = session.snapshot();
        let err = session.use_ability(2).unwrap_err();
        assert_eq!(err, SessionError::InsufficientEnergy { energy: 0, required: 20 });
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut session = start_protester();
        session.tick();
        assert!(session.pause().changed);
        let frozen = session.snapshot();

        for _ in 0..3 {
            session.tick();
        }
        session.action(ActionKind::Attack);
        session.action(ActionKind::Collect);
        assert!(!session.use_ability(1).unwrap().changed);
        assert_eq!(session.snapshot(), frozen);

        assert!(session.resume().changed);
        session.tick();
        assert_eq!(session.snapshot().elapsed_seconds, frozen.elapsed_seconds + 1);
    }

    #[test]
    fn test_pause_resume_are_idempotent() {
        let mut session = start_protester();
        assert!(!session.resume().changed);
        assert!(session.pause().changed);
        let second = session.pause();
        assert!(!second.changed);
        assert!(second.notice.is_none());

        assert_eq!(session.toggle_pause().notice, Some(Notice::resumed()));
        assert!(!session.is_paused());
        assert_eq!(session.toggle_pause().notice, Some(Notice::paused()));
        assert!(session.is_paused());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = start_protester();
        session.action(ActionKind::Jump);
        session.use_ability(4).unwrap();
        session.tick();
        session.pause();

        let transition = session.reset();
        assert_eq!(transition.notice, Some(Notice::restarted()));
        assert_eq!(session.snapshot(), SessionStateView::default());
        assert_eq!(session.selection().faction, Faction::Protester);

        // Second reset is a no-op.
        assert!(!session.reset().changed);
        assert_eq!(session.snapshot(), SessionStateView::default());
    }

    #[test]
    fn test_objective_progress_follows_uses() {
        let mut session = start_protester();
        session.use_ability(1).unwrap();
        session.use_ability(1).unwrap();

        let (objective, progress) = session.objective();
        assert_eq!(objective.task, "Rally supporters");
        assert_eq!(progress.current, 2);
        assert_eq!(progress.target, 3);
    }
}
