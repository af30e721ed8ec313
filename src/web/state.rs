use std::{fmt, sync::Arc, time::Duration};

use crate::generation::{Orchestrator, Temperatures};
use crate::llm::ModelGateway;
use crate::model::ModelManager;
use crate::web::SessionStore;

#[derive(Clone)]
pub struct AppState {
    mm: ModelManager,
    gateway: Arc<dyn ModelGateway>,
    sessions: SessionStore,
    temperatures: Temperatures,
}

impl AppState {
    pub fn new(mm: ModelManager, gateway: Arc<dyn ModelGateway>, temperatures: Temperatures) -> Self {
        Self {
            mm,
            gateway,
            sessions: SessionStore::default(),
            temperatures,
        }
    }

    pub fn with_session_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.sessions = SessionStore::new(idle_timeout);
        self
    }

    pub fn pool(&self) -> &ModelManager {
        &self.mm
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn orchestrator(&self) -> Orchestrator<'_> {
        Orchestrator::new(self.gateway.as_ref(), &self.mm, self.temperatures)
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("mm", &self.mm)
            .field("sessions", &self.sessions)
            .field("temperatures", &self.temperatures)
            .finish_non_exhaustive()
    }
}
