//! Session Handle
//!
//! Runs one [`Session`] inside a dedicated task. Every mutation (clock
//! ticks included) travels through a single command queue and is applied
//! in arrival order, so no two transitions ever interleave. After each
//! transition the actor publishes an immutable snapshot on a watch
//! channel; readers never wait on the actor and never see half a change.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::action::ActionKind;
use crate::game::character::{CharacterSelection, Difficulty};
use crate::game::events::Notice;
use crate::game::session::{Session, SessionError, Transition};
use crate::game::state::SessionStateView;
use crate::host::clock::TickSource;
use crate::host::config::SessionConfig;
use crate::host::protocol::SessionCommand;
use crate::host::{short_id, HostError};

/// Unique session identifier.
pub type SessionId = Uuid;

type CommandReply = Result<Transition, SessionError>;

/// Message into the actor.
enum Request {
    /// Apply a command, optionally reporting back.
    Apply {
        command: SessionCommand,
        reply: Option<oneshot::Sender<CommandReply>>,
    },
    /// Stop the actor.
    Close,
}

impl Request {
    fn tick() -> Self {
        Request::Apply {
            command: SessionCommand::Tick,
            reply: None,
        }
    }
}

/// Apply one command to a session.
pub fn apply_command(session: &mut Session, command: SessionCommand) -> CommandReply {
    match command {
        SessionCommand::Action { kind } => Ok(session.action(kind)),
        SessionCommand::UseAbility { slot } => session.use_ability(slot),
        SessionCommand::Pause => Ok(session.pause()),
        SessionCommand::Resume => Ok(session.resume()),
        SessionCommand::TogglePause => Ok(session.toggle_pause()),
        SessionCommand::Reset => Ok(session.reset()),
        SessionCommand::Tick => {
            let result = session.tick();
            Ok(Transition {
                changed: result.advanced,
                notice: None,
            })
        }
    }
}

/// Handle to a hosted session.
pub struct SessionHandle {
    id: SessionId,
    selection: CharacterSelection,
    difficulty: Difficulty,
    started_at: DateTime<Utc>,
    commands: mpsc::Sender<Request>,
    state_rx: watch::Receiver<Arc<SessionStateView>>,
    notice_tx: broadcast::Sender<Notice>,
    /// Dropped with the handle, which aborts the timer task.
    clock: Mutex<Option<TickSource>>,
    actor: Mutex<Option<JoinHandle<()>>>,
}

impl SessionHandle {
    /// Start a hosted session with a fresh id.
    ///
    /// Validates the selection, spawns the actor and starts the clock.
    /// Returns the handle and the session-start notice. Must be called from
    /// within a tokio runtime.
    pub fn start(
        selection: Option<CharacterSelection>,
        difficulty: Difficulty,
        config: &SessionConfig,
    ) -> Result<(Self, Notice), HostError> {
        Self::start_with_id(Uuid::new_v4(), selection, difficulty, config)
    }

    /// Start a hosted session under a given id.
    pub fn start_with_id(
        id: SessionId,
        selection: Option<CharacterSelection>,
        difficulty: Difficulty,
        config: &SessionConfig,
    ) -> Result<(Self, Notice), HostError> {
        let (session, notice) = Session::start(selection, difficulty)?;
        let selection = session.selection().clone();

        let (commands, inbox) = mpsc::channel(config.command_buffer.max(1));
        let (state_tx, state_rx) = watch::channel(Arc::new(session.snapshot()));
        let (notice_tx, _) = broadcast::channel(config.notice_buffer.max(1));

        let actor = tokio::spawn(run_session_actor(
            id,
            session,
            inbox,
            state_tx,
            notice_tx.clone(),
        ));

        // A new session starts running, so the clock starts with it.
        let clock = TickSource::start(config.tick_period, commands.clone(), Request::tick);

        info!(
            "Session {} started: {} on {}",
            short_id(&id),
            selection.name,
            difficulty.as_str()
        );

        Ok((
            Self {
                id,
                selection,
                difficulty,
                started_at: Utc::now(),
                commands,
                state_rx,
                notice_tx,
                clock: Mutex::new(Some(clock)),
                actor: Mutex::new(Some(actor)),
            },
            notice,
        ))
    }

    /// Session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Character this session is played with.
    pub fn selection(&self) -> &CharacterSelection {
        &self.selection
    }

    /// Difficulty chosen at start.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// When the session was started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Latest published snapshot. Never blocks.
    pub fn snapshot(&self) -> Arc<SessionStateView> {
        self.state_rx.borrow().clone()
    }

    /// Receiver that wakes on every published snapshot.
    pub fn watch_state(&self) -> watch::Receiver<Arc<SessionStateView>> {
        self.state_rx.clone()
    }

    /// Subscribe to notices raised from now on.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notice_tx.subscribe()
    }

    /// Send a command and wait for it to be applied.
    pub async fn send(&self, command: SessionCommand) -> Result<Transition, HostError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Request::Apply {
                command,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| HostError::Closed)?;

        let reply = reply_rx.await.map_err(|_| HostError::Closed)?;
        Ok(reply?)
    }

    /// Apply a basic action.
    pub async fn action(&self, kind: ActionKind) -> Result<Transition, HostError> {
        self.send(SessionCommand::Action { kind }).await
    }

    /// Use the ability in `slot`.
    pub async fn use_ability(&self, slot: u8) -> Result<Transition, HostError> {
        self.send(SessionCommand::UseAbility { slot }).await
    }

    /// Pause.
    pub async fn pause(&self) -> Result<Transition, HostError> {
        self.send(SessionCommand::Pause).await
    }

    /// Resume.
    pub async fn resume(&self) -> Result<Transition, HostError> {
        self.send(SessionCommand::Resume).await
    }

    /// Flip paused/running.
    pub async fn toggle_pause(&self) -> Result<Transition, HostError> {
        self.send(SessionCommand::TogglePause).await
    }

    /// Reset to defaults.
    pub async fn reset(&self) -> Result<Transition, HostError> {
        self.send(SessionCommand::Reset).await
    }

    /// Deliver one tick by hand, outside the clock.
    pub async fn tick(&self) -> Result<Transition, HostError> {
        self.send(SessionCommand::Tick).await
    }

    /// Whether the clock is still delivering ticks.
    pub async fn clock_running(&self) -> bool {
        self.clock
            .lock()
            .await
            .as_ref()
            .is_some_and(TickSource::is_running)
    }

    /// Tear the session down: stop the clock, then stop the actor.
    ///
    /// The clock is stopped first so no tick is queued behind the close.
    /// Safe to call more than once.
    pub async fn close(&self) {
        let clock = self.clock.lock().await.take();
        if let Some(clock) = clock {
            clock.stop().await;
        }

        let _ = self.commands.send(Request::Close).await;
        let actor = self.actor.lock().await.take();
        if let Some(actor) = actor {
            let _ = actor.await;
        }
    }
}

/// Actor loop: the only place session state is mutated.
async fn run_session_actor(
    id: SessionId,
    mut session: Session,
    mut inbox: mpsc::Receiver<Request>,
    state_tx: watch::Sender<Arc<SessionStateView>>,
    notice_tx: broadcast::Sender<Notice>,
) {
    while let Some(request) = inbox.recv().await {
        let (command, reply) = match request {
            Request::Apply { command, reply } => (command, reply),
            Request::Close => break,
        };

        let result = apply_command(&mut session, command);

        match &result {
            Ok(transition) => {
                if transition.changed {
                    state_tx.send_replace(Arc::new(session.snapshot()));
                }
                if let Some(notice) = &transition.notice {
                    let _ = notice_tx.send(notice.clone());
                }
            }
            Err(SessionError::InsufficientEnergy { energy, required }) => {
                debug!("Session {}: ability refused, energy {}/{}", short_id(&id), energy, required);
                let _ = notice_tx.send(Notice::insufficient_energy(*energy, *required));
            }
            Err(e) => {
                debug!("Session {}: {} failed: {}", short_id(&id), command.name(), e);
            }
        }

        if let Some(reply) = reply {
            let _ = reply.send(result);
        }
    }

    info!("Session {} closed", short_id(&id));
}
