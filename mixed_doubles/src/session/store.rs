//! In-memory tournament sessions keyed by session id.

use super::{
    errors::{TournamentError, TournamentResult},
    tournament::TournamentSession,
};
use log::info;
use std::collections::HashMap;
use uuid::Uuid;

/// Session identifier
pub type SessionId = Uuid;

/// Default number of sessions kept before the oldest is evicted
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// In-memory session store.
///
/// Nothing is persisted; sessions live until evicted, replaced or the
/// process exits.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<SessionId, TournamentSession>,
    capacity: usize,
}

impl SessionStore {
    /// Create a store holding at most `capacity` sessions (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Generate a fresh session id
    pub fn new_id() -> SessionId {
        Uuid::new_v4()
    }

    /// Store a session, replacing any previous tournament under the same id.
    ///
    /// Returns the id of the session evicted to make room, if any.
    pub fn insert(&mut self, id: SessionId, session: TournamentSession) -> Option<SessionId> {
        let evicted = if !self.sessions.contains_key(&id) && self.sessions.len() >= self.capacity
        {
            self.evict_oldest()
        } else {
            None
        };

        self.sessions.insert(id, session);
        evicted
    }

    /// Get a session
    ///
    /// # Errors
    ///
    /// * `NoTournamentData` - no tournament exists for this id
    pub fn get(&self, id: &SessionId) -> TournamentResult<&TournamentSession> {
        self.sessions
            .get(id)
            .ok_or(TournamentError::NoTournamentData)
    }

    /// Get a session mutably
    ///
    /// # Errors
    ///
    /// * `NoTournamentData` - no tournament exists for this id
    pub fn get_mut(&mut self, id: &SessionId) -> TournamentResult<&mut TournamentSession> {
        self.sessions
            .get_mut(id)
            .ok_or(TournamentError::NoTournamentData)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&mut self) -> Option<SessionId> {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|(_, session)| session.created_at())
            .map(|(id, _)| *id)?;

        self.sessions.remove(&oldest);
        info!("Evicted session {} to stay within {} sessions", oldest, self.capacity);
        Some(oldest)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}
