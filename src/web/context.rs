//! Learner session context: the path being browsed, the selected module and
//! the answers given so far, keyed by the `SID` cookie.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::web::{WebResult, error::WebError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
pub struct LearnerSession {
    path_id: Option<Uuid>,
    selected_module: Option<String>,
    answers: Vec<SessionAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct SessionAnswer {
    pub exercise_id: Uuid,
    pub module_name: String,
    pub user_answer: String,
    pub is_correct: bool,
}

impl LearnerSession {
    pub fn path_id(&self) -> Option<Uuid> {
        self.path_id
    }

    pub fn selected_module(&self) -> Option<&str> {
        self.selected_module.as_deref()
    }

    pub fn answers(&self) -> &[SessionAnswer] {
        &self.answers
    }

    /// Switches to another path, forgetting everything tied to the old one.
    pub fn start_path(&mut self, path_id: Uuid) {
        self.path_id = Some(path_id);
        self.selected_module = None;
        self.answers.clear();
    }

    pub fn select_module(&mut self, path_id: Uuid, module_name: &str) {
        if self.path_id != Some(path_id) {
            self.start_path(path_id);
        }
        self.selected_module = Some(module_name.to_string());
    }

    /// Keeps only the latest answer per exercise.
    pub fn record_answer(&mut self, path_id: Uuid, answer: SessionAnswer) {
        if self.path_id != Some(path_id) {
            self.start_path(path_id);
        }

        match self
            .answers
            .iter_mut()
            .find(|a| a.exercise_id == answer.exercise_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }
}

/// Idle time after which a learner session is forgotten by default.
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug)]
struct SessionEntry {
    session: LearnerSession,
    last_seen: Instant,
}

/// In-memory session table shared by all handlers.
///
/// A session id only gets an entry once something is written to it, so
/// clients that never keep the cookie leave nothing behind. Entries idle for
/// longer than the timeout are dropped whenever a new one is added.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    /// Unknown or expired ids read as an empty session.
    pub async fn get(&self, sid: Uuid) -> LearnerSession {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&sid) {
            Some(entry) if entry.last_seen.elapsed() < self.idle_timeout => {
                entry.last_seen = Instant::now();
                entry.session.clone()
            }
            _ => LearnerSession::default(),
        }
    }

    /// Applies `f` to the session, creating it on first write.
    pub async fn update<F>(&self, sid: Uuid, f: F) -> LearnerSession
    where
        F: FnOnce(&mut LearnerSession),
    {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&sid) {
            let before = sessions.len();
            sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_timeout);
            if sessions.len() < before {
                tracing::debug!("dropped {} idle learner sessions", before - sessions.len());
            }
        }

        let entry = sessions.entry(sid).or_insert_with(|| SessionEntry {
            session: LearnerSession::default(),
            last_seen: Instant::now(),
        });
        if entry.last_seen.elapsed() >= self.idle_timeout {
            entry.session = LearnerSession::default();
        }
        entry.last_seen = Instant::now();
        f(&mut entry.session);
        entry.session.clone()
    }

    pub async fn remove(&self, sid: Uuid) -> Option<LearnerSession> {
        self.sessions.write().await.remove(&sid).map(|entry| entry.session)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Session id of the current request, injected by
/// [`session_context_fn`](crate::web::middlewares::session_context_fn).
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    sid: Uuid,
}

impl SessionContext {
    pub fn new(sid: Uuid) -> Self {
        Self { sid }
    }

    pub fn sid(&self) -> Uuid {
        self.sid
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> WebResult<Self> {
        parts
            .extensions
            .get::<SessionContext>()
            .copied()
            .ok_or(WebError::session_unavailable())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn answer(exercise_id: Uuid, user_answer: &str, is_correct: bool) -> SessionAnswer {
        SessionAnswer {
            exercise_id,
            module_name: String::from("Basics"),
            user_answer: user_answer.to_string(),
            is_correct,
        }
    }

    #[test]
    fn record_answer_keeps_latest_test() {
        let path_id = Uuid::new_v4();
        let exercise_id = Uuid::new_v4();
        let mut session = LearnerSession::default();

        session.record_answer(path_id, answer(exercise_id, "var", false));
        session.record_answer(path_id, answer(exercise_id, "let", true));
        session.record_answer(path_id, answer(Uuid::new_v4(), "a crate", true));

        assert_eq!(session.path_id(), Some(path_id));
        assert_eq!(session.answers().len(), 2);
        assert_eq!(session.answers()[0].user_answer, "let");
        assert!(session.answers()[0].is_correct);
    }

    #[test]
    fn switching_path_resets_test() {
        let first = Uuid::new_v4();
        let mut session = LearnerSession::default();
        session.select_module(first, "Basics");
        session.record_answer(first, answer(Uuid::new_v4(), "let", true));

        let second = Uuid::new_v4();
        session.select_module(second, "Traits");

        assert_eq!(session.path_id(), Some(second));
        assert_eq!(session.selected_module(), Some("Traits"));
        assert!(session.answers().is_empty());
    }

    #[tokio::test]
    async fn session_store_test() {
        let store = SessionStore::default();
        let sid = Uuid::new_v4();
        assert_eq!(store.get(sid).await, LearnerSession::default());
        // reading never creates an entry
        assert_eq!(store.len().await, 0);

        let path_id = Uuid::new_v4();
        let session = store.update(sid, |s| s.start_path(path_id)).await;
        assert_eq!(session.path_id(), Some(path_id));
        assert_eq!(store.get(sid).await.path_id(), Some(path_id));
        assert_eq!(store.len().await, 1);

        assert!(store.remove(sid).await.is_some());
        assert_eq!(store.len().await, 0);
        assert_eq!(store.get(sid).await, LearnerSession::default());
    }

    #[tokio::test]
    async fn idle_sessions_are_dropped_test() {
        let store = SessionStore::new(Duration::from_millis(20));
        let stale = Uuid::new_v4();
        store.update(stale, |s| s.start_path(Uuid::new_v4())).await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.get(stale).await, LearnerSession::default());

        let fresh = Uuid::new_v4();
        store.update(fresh, |s| s.start_path(Uuid::new_v4())).await;
        assert_eq!(store.len().await, 1);
        assert!(store.get(fresh).await.path_id().is_some());
    }
}
