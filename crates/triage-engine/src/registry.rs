//! In-memory session store for hosts serving many patients at once.
//!
//! Each session sits behind its own mutex so updates to different sessions
//! never contend; the outer lock is held only for map lookups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use triage_core::errors::CoreError;
use triage_core::responses::SessionState;

use crate::engine::TriageEngine;
use crate::error::EngineError;
use crate::session::TriageSession;

type SharedSession = Arc<Mutex<TriageSession>>;

/// Session id → session. Nothing is persisted.
#[derive(Debug)]
pub struct SessionRegistry {
    engine: Arc<TriageEngine>,
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(engine: Arc<TriageEngine>) -> Self {
        Self {
            engine,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &Arc<TriageEngine> {
        &self.engine
    }

    /// Start and register a session.
    ///
    /// # Errors
    ///
    /// Propagates [`TriageEngine::start`] failures.
    pub fn start<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<SessionState, EngineError> {
        let session = self.engine.start(symptoms)?;
        let state = session.state();
        self.sessions
            .write()
            .map_err(|_| EngineError::Poisoned("registry".into()))?
            .insert(state.session_id.clone(), Arc::new(Mutex::new(session)));
        Ok(state)
    }

    /// Answer the pending question of session `id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for an unknown id and the engine's
    /// invalid-operation errors for terminal sessions.
    pub fn update(&self, id: &str, answer: &str) -> Result<SessionState, EngineError> {
        let shared = self.lookup(id)?;
        let mut session = shared.lock().map_err(|_| EngineError::Poisoned(id.to_string()))?;
        self.engine.update(&mut session, answer)
    }

    /// Current snapshot of session `id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for an unknown id.
    pub fn get(&self, id: &str) -> Result<SessionState, EngineError> {
        let shared = self.lookup(id)?;
        let session = shared.lock().map_err(|_| EngineError::Poisoned(id.to_string()))?;
        Ok(session.state())
    }

    /// Drop session `id`; returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Poisoned`] if the registry lock is poisoned.
    pub fn remove(&self, id: &str) -> Result<bool, EngineError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| EngineError::Poisoned("registry".into()))?;
        Ok(sessions.remove(id).is_some())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().map_or(0, |s| s.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, id: &str) -> Result<SharedSession, EngineError> {
        self.sessions
            .read()
            .map_err(|_| EngineError::Poisoned("registry".into()))?
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::SessionNotFound(id.to_string()).into())
    }
}
