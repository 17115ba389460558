//! Engine front door: owns the active simulation session.
//!
//! The surrounding application keeps one `SimulationEngine` and routes every
//! simulation entry point through it, so the engine has no ambient
//! dependency on UI state: selecting an environment returns an explicit
//! session handle, and leaving the simulation view discards it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use conclave_core::environment::Environment;
use conclave_core::error::Result;
use conclave_core::store::CredentialStore;

use crate::config::EngineConfig;
use crate::session::{RunPhase, SimulationSession};

/// Engine-level lifecycle; `Idle` means no environment is selected.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    Idle,
    Ready,
    Running,
    Stopped,
}

impl From<RunPhase> for EnginePhase {
    fn from(phase: RunPhase) -> Self {
        match phase {
            RunPhase::Ready => EnginePhase::Ready,
            RunPhase::Running => EnginePhase::Running,
            RunPhase::Stopped => EnginePhase::Stopped,
        }
    }
}

/// Manages the single active simulation session.
pub struct SimulationEngine {
    credentials: Arc<dyn CredentialStore>,
    config: EngineConfig,
    active: RwLock<Option<Arc<SimulationSession>>>,
}

impl SimulationEngine {
    /// Creates an engine with the default configuration.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self::with_config(credentials, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(credentials: Arc<dyn CredentialStore>, config: EngineConfig) -> Self {
        Self {
            credentials,
            config,
            active: RwLock::new(None),
        }
    }

    /// Builds a fresh session for `environment` and makes it active.
    ///
    /// Any previous session is stopped and discarded along with its
    /// transcript and run state.
    pub async fn select_environment(
        &self,
        environment: Environment,
    ) -> Result<Arc<SimulationSession>> {
        let session = Arc::new(
            SimulationSession::new(environment, self.credentials.as_ref(), self.config.clone())
                .await?,
        );

        let mut active = self.active.write().await;
        if let Some(previous) = active.take() {
            previous.request_stop();
            info!(environment = %previous.environment().name, "discarded previous session");
        }
        *active = Some(session.clone());

        Ok(session)
    }

    /// The currently active session, if an environment is selected.
    pub async fn active_session(&self) -> Option<Arc<SimulationSession>> {
        self.active.read().await.clone()
    }

    /// Leaves the simulation view: stops and discards the active session.
    pub async fn clear_session(&self) {
        let mut active = self.active.write().await;
        if let Some(previous) = active.take() {
            previous.request_stop();
            info!(environment = %previous.environment().name, "session cleared");
        }
    }

    /// Engine-level phase: `Idle` with no session, otherwise the session's
    /// phase.
    pub async fn phase(&self) -> EnginePhase {
        match self.active.read().await.as_ref() {
            Some(session) => session.phase().await.into(),
            None => EnginePhase::Idle,
        }
    }
}
