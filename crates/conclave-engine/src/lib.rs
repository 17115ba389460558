//! Conclave turn engine.
//!
//! Drives turn-based conversational simulations among the personas of an
//! environment: round-robin auto-loop scheduling with pacing, manual turns,
//! user message injection, cooperative cancellation, and graceful
//! degradation when a model provider fails.
//!
//! Entry points are explicit: [`engine::SimulationEngine`] owns at most one
//! [`session::SimulationSession`], and every operation takes or returns a
//! session handle rather than reading ambient state.
//!
//! ```no_run
//! use std::sync::Arc;
//! use conclave_core::store::MemoryCredentialStore;
//! use conclave_engine::SimulationEngine;
//!
//! # async fn run(environment: conclave_core::environment::Environment) -> conclave_core::Result<()> {
//! let engine = SimulationEngine::new(Arc::new(MemoryCredentialStore::new()));
//! let session = engine.select_environment(environment).await?;
//! session.run_auto_loop().await?;
//! let transcript = session.transcript().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod session;

pub use config::{DEFAULT_ROUNDS, DEFAULT_TURN_DELAY, EngineConfig};
pub use engine::{EnginePhase, SimulationEngine};
pub use session::{RunPhase, SimulationSession, TurnOutcome};
