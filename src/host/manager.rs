//! Session Manager
//!
//! Registry of live sessions keyed by id. Removing a session tears it
//! down, stopping its clock before it is dropped.

use std::collections::BTreeMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::game::character::{CharacterSelection, Difficulty, Faction};
use crate::game::events::Notice;
use crate::host::config::SessionConfig;
use crate::host::handle::{SessionHandle, SessionId};
use crate::host::{short_id, HostError};

/// Summary of a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// Session id.
    pub id: SessionId,
    /// Character name.
    pub character: String,
    /// Character faction.
    pub faction: Faction,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Start time.
    pub started_at: DateTime<Utc>,
    /// Seconds of unpaused play so far.
    pub elapsed_seconds: u32,
    /// Whether currently paused.
    pub paused: bool,
}

/// Manages all active sessions.
pub struct SessionManager {
    /// Config applied to new sessions.
    config: SessionConfig,
    /// Active sessions.
    sessions: RwLock<BTreeMap<SessionId, Arc<SessionHandle>>>,
}

impl SessionManager {
    /// Create new session manager.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Config used for new sessions.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start and register a new session.
    pub async fn create_session(
        &self,
        selection: Option<CharacterSelection>,
        difficulty: Difficulty,
    ) -> Result<(SessionId, Notice), HostError> {
        let (handle, notice) = SessionHandle::start(selection, difficulty, &self.config)?;
        let id = handle.id();

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, Arc::new(handle));

        Ok((id, notice))
    }

    /// Get a session by ID.
    pub async fn get_session(&self, id: &SessionId) -> Option<Arc<SessionHandle>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Get a session by ID or fail with [`HostError::NotFound`].
    pub async fn require_session(&self, id: &SessionId) -> Result<Arc<SessionHandle>, HostError> {
        self.get_session(id).await.ok_or(HostError::NotFound(*id))
    }

    /// Tear down and forget a session. Returns false if it was unknown.
    pub async fn remove_session(&self, id: &SessionId) -> bool {
        let removed = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(id)
        };

        match removed {
            Some(handle) => {
                handle.close().await;
                info!("Session {} removed", short_id(id));
                true
            }
            None => false,
        }
    }

    /// Get active session count.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Summaries of all live sessions, in id order.
    pub async fn list(&self) -> Vec<SessionInfo> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .map(|handle| {
                let view = handle.snapshot();
                SessionInfo {
                    id: handle.id(),
                    character: handle.selection().name.clone(),
                    faction: handle.selection().faction,
                    difficulty: handle.difficulty(),
                    started_at: handle.started_at(),
                    elapsed_seconds: view.elapsed_seconds,
                    paused: view.paused,
                }
            })
            .collect()
    }

    /// Tear down every session.
    pub async fn shutdown(&self) {
        let drained: Vec<Arc<SessionHandle>> = {
            let mut sessions = self.sessions.write().await;
            std::mem::take(&mut *sessions).into_values().collect()
        };

        for handle in drained {
            handle.close().await;
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::character::find_character;

    fn captain() -> Option<CharacterSelection> {
        find_character("police-captain").and_then(|c| c.select().ok())
    }

    #[tokio::test]
    async fn test_session_manager() {
        let manager = SessionManager::default();

        let (session_id, _) = manager.create_session(captain(), Difficulty::Hard).await.unwrap();
        assert_eq!(manager.session_count().await, 1);

        let session = manager.get_session(&session_id).await;
        assert!(session.is_some());

        assert!(manager.remove_session(&session_id).await);
        assert_eq!(manager.session_count().await, 0);
        assert!(!manager.remove_session(&session_id).await);
    }

    #[tokio::test]
    async fn test_removed_session_is_closed() {
        let manager = SessionManager::default();
        let (id, _) = manager.create_session(captain(), Difficulty::Normal).await.unwrap();
        let handle = manager.require_session(&id).await.unwrap();

        manager.remove_session(&id).await;
        assert!(!handle.clock_running().await);
        assert!(matches!(handle.action(crate::game::ActionKind::Jump).await, Err(HostError::Closed)));
        assert!(matches!(manager.require_session(&id).await, Err(HostError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_selection_registers_nothing() {
        let manager = SessionManager::default();
        let locked = find_character("shadow-goon").unwrap().select().ok();
        assert!(locked.is_none());

        let result = manager.create_session(locked, Difficulty::Easy).await;
        assert!(result.is_err());
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let manager = SessionManager::default();
        let (a, _) = manager.create_session(captain(), Difficulty::Easy).await.unwrap();
        let (b, _) = manager.create_session(captain(), Difficulty::Hard).await.unwrap();

        manager.require_session(&a).await.unwrap().action(crate::game::ActionKind::Attack).await.unwrap();

        let infos = manager.list().await;
        assert_eq!(infos.len(), 2);
        assert_eq!(manager.require_session(&a).await.unwrap().snapshot().score, 25);
        assert_eq!(manager.require_session(&b).await.unwrap().snapshot().score, 0);

        manager.shutdown().await;
        assert_eq!(manager.session_count().await, 0);
    }
}
