//! Simulation session: transcript ownership, run state, and the turn loop.
//!
//! One `SimulationSession` drives one simulation run for one environment.
//! All turn execution - auto-loop and manual - funnels through a single turn
//! guard, so at most one adapter call is in flight per session and transcript
//! appends are strictly ordered.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use conclave_core::environment::{Environment, InteractionMode};
use conclave_core::error::{ConclaveError, Result};
use conclave_core::persona::Persona;
use conclave_core::prompt::build_system_prompt;
use conclave_core::store::CredentialStore;
use conclave_core::transcript::{Message, Transcript};
use conclave_interaction::{
    HistoryMessage, ModelAdapter, SimulatedAdapter, TurnRequest, resolve_adapter,
};

use crate::config::EngineConfig;

/// Observable lifecycle of a simulation session.
///
/// The engine-level Idle state (no environment selected, so no session
/// object) lives in [`crate::engine::EnginePhase`].
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Transcript seeded; waiting for an auto-loop run or manual turns
    Ready,
    /// Auto-loop active
    Running,
    /// Auto-loop finished or stopped; manual turns and re-runs are allowed
    Stopped,
}

/// Result of a manual turn request.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The persona spoke; `live` is false when the reply was a fallback
    Spoke { live: bool },
    /// Another turn was already in flight; nothing happened
    Busy,
}

/// One environment participant with its adapter resolved up front.
struct Participant {
    persona: Persona,
    system_prompt: String,
    adapter: Box<dyn ModelAdapter>,
    fallback: SimulatedAdapter,
}

struct RunState {
    phase: RunPhase,
    rounds_completed: u32,
}

/// A running simulation: owns the transcript and all transient run state.
///
/// Discarded (along with its transcript) when the engine selects a different
/// environment or the user leaves the simulation view.
pub struct SimulationSession {
    environment: Environment,
    participants: Vec<Participant>,
    transcript: RwLock<Transcript>,
    run_state: RwLock<RunState>,
    /// Serializes turn execution across the auto-loop and manual paths
    turn_guard: Mutex<()>,
    /// Cooperative "should stop" flag, polled at every loop boundary
    stop_requested: AtomicBool,
    config: EngineConfig,
}

impl std::fmt::Debug for SimulationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationSession")
            .field("environment", &self.environment)
            .field("participant_count", &self.participants.len())
            .finish_non_exhaustive()
    }
}

impl SimulationSession {
    /// Resolves one adapter per participant and seeds the transcript.
    ///
    /// The session starts in [`RunPhase::Ready`]. Fails with a validation
    /// error when the environment has no participants.
    pub async fn new(
        environment: Environment,
        credentials: &dyn CredentialStore,
        config: EngineConfig,
    ) -> Result<Self> {
        let mut adapters = Vec::with_capacity(environment.participants.len());
        for persona in &environment.participants {
            adapters.push(resolve_adapter(persona, credentials).await);
        }
        Self::assemble(environment, adapters, config)
    }

    /// Builds a session from pre-resolved adapters, one per participant in
    /// participant order.
    ///
    /// Callers normally go through [`SimulationSession::new`] or
    /// [`crate::engine::SimulationEngine::select_environment`]; this seam
    /// exists so adapters can be substituted.
    pub fn assemble(
        environment: Environment,
        adapters: Vec<Box<dyn ModelAdapter>>,
        config: EngineConfig,
    ) -> Result<Self> {
        if environment.participants.is_empty() {
            return Err(ConclaveError::validation(
                "An active simulation needs at least one participant",
            ));
        }
        if adapters.len() != environment.participants.len() {
            return Err(ConclaveError::internal(
                "exactly one adapter per participant is required",
            ));
        }

        let participants = environment
            .participants
            .iter()
            .zip(adapters)
            .map(|(persona, adapter)| Participant {
                system_prompt: build_system_prompt(persona),
                fallback: SimulatedAdapter::for_persona(persona),
                persona: persona.clone(),
                adapter,
            })
            .collect();

        let mut transcript = Transcript::new();
        seed_transcript(&mut transcript, &environment);

        Ok(Self {
            environment,
            participants,
            transcript: RwLock::new(transcript),
            run_state: RwLock::new(RunState {
                phase: RunPhase::Ready,
                rounds_completed: 0,
            }),
            turn_guard: Mutex::new(()),
            stop_requested: AtomicBool::new(false),
            config,
        })
    }

    /// The environment this session runs.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// A snapshot of the transcript, for rendering or export.
    pub async fn transcript(&self) -> Transcript {
        self.transcript.read().await.clone()
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> RunPhase {
        self.run_state.read().await.phase
    }

    /// Rounds fully completed by the most recent auto-loop run.
    pub async fn rounds_completed(&self) -> u32 {
        self.run_state.read().await.rounds_completed
    }

    /// Requests a cooperative stop of the auto-loop.
    ///
    /// The flag is polled before each round, before each turn, and after
    /// each turn; an in-flight adapter call is allowed to complete first.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    /// Runs the auto-loop: `config.rounds` rounds of round-robin turns in
    /// participant order, pacing each turn with `config.turn_delay`.
    ///
    /// Returns once the round budget is exhausted or a stop was requested;
    /// the session is then in [`RunPhase::Stopped`]. Adapter failures never
    /// abort the loop - they degrade into fallback replies (see
    /// [`SimulationSession::speak`] for the per-turn contract).
    pub async fn run_auto_loop(&self) -> Result<()> {
        if self.environment.mode == InteractionMode::Manual {
            return Err(ConclaveError::validation(
                "environment is manual-only; the auto-loop is disabled",
            ));
        }

        {
            let mut state = self.run_state.write().await;
            if state.phase == RunPhase::Running {
                return Err(ConclaveError::internal("auto-loop is already running"));
            }
            state.phase = RunPhase::Running;
            state.rounds_completed = 0;
        }
        self.stop_requested.store(false, Ordering::SeqCst);

        info!(
            environment = %self.environment.name,
            participants = self.participants.len(),
            rounds = self.config.rounds,
            "auto-loop started"
        );

        'rounds: for round in 1..=self.config.rounds {
            if self.stop_requested.load(Ordering::SeqCst) {
                break;
            }

            for index in 0..self.participants.len() {
                if self.stop_requested.load(Ordering::SeqCst) {
                    break 'rounds;
                }

                {
                    let _guard = self.turn_guard.lock().await;
                    self.execute_turn(index).await;
                }

                if self.stop_requested.load(Ordering::SeqCst) {
                    break 'rounds;
                }

                tokio::time::sleep(self.config.turn_delay).await;
            }

            self.run_state.write().await.rounds_completed = round;
        }

        let mut state = self.run_state.write().await;
        state.phase = RunPhase::Stopped;
        info!(rounds_completed = state.rounds_completed, "auto-loop stopped");
        Ok(())
    }

    /// Performs a single manual turn for the persona, with no pacing delay
    /// and no round bookkeeping.
    ///
    /// Returns [`TurnOutcome::Busy`] without doing anything when another
    /// turn is already in flight.
    pub async fn speak(&self, persona_id: &str) -> Result<TurnOutcome> {
        let index = self
            .participants
            .iter()
            .position(|p| p.persona.id == persona_id)
            .ok_or_else(|| ConclaveError::not_found("persona", persona_id))?;

        let Ok(_guard) = self.turn_guard.try_lock() else {
            debug!(persona_id, "turn already in flight; ignoring manual turn request");
            return Ok(TurnOutcome::Busy);
        };

        let live = self.execute_turn(index).await;
        Ok(TurnOutcome::Spoke { live })
    }

    /// Appends a user message immediately.
    ///
    /// Never triggers an adapter call; the text becomes part of history for
    /// the next agent turn.
    pub async fn post_user_message(&self, text: impl Into<String>) -> Message {
        let message = Message::user(text);
        self.transcript.write().await.push(message.clone());
        message
    }

    /// Clears the transcript, reseeds it from the environment, and returns
    /// the session to [`RunPhase::Ready`].
    pub async fn restart(&self) -> Result<()> {
        let mut state = self.run_state.write().await;
        if state.phase == RunPhase::Running {
            return Err(ConclaveError::internal("cannot restart while running"));
        }

        let mut transcript = self.transcript.write().await;
        transcript.clear();
        seed_transcript(&mut transcript, &self.environment);

        state.phase = RunPhase::Ready;
        state.rounds_completed = 0;
        self.stop_requested.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Runs one participant's turn. The caller must hold the turn guard.
    ///
    /// Returns whether the appended reply came from a live model call.
    async fn execute_turn(&self, index: usize) -> bool {
        let participant = &self.participants[index];

        let request = {
            let transcript = self.transcript.read().await;
            self.turn_request(&transcript, participant)
        };

        debug!(
            persona = %participant.persona.name,
            provider = %participant.adapter.provider(),
            "taking turn"
        );

        let message = match participant.adapter.generate_reply(&request).await {
            Ok(text) => Message::agent(&participant.persona, text, true),
            Err(err) => {
                warn!(
                    persona = %participant.persona.name,
                    error = %err,
                    "model call failed; appending fallback reply"
                );
                let filler = participant
                    .fallback
                    .generate_reply(&request)
                    .await
                    .unwrap_or_else(|_| {
                        format!("{} has nothing to add right now.", participant.persona.name)
                    });
                let text = format!(
                    "[{} unavailable: {}] {}",
                    participant.persona.provider, err, filler
                );
                Message::agent(&participant.persona, text, false)
            }
        };

        let live = message.live;
        self.transcript.write().await.push(message);
        live
    }

    /// Maps the transcript into the speaking persona's view of the
    /// conversation: own earlier replies become assistant turns, everything
    /// else becomes user turns (other speakers prefixed with their name).
    fn turn_request(&self, transcript: &Transcript, participant: &Participant) -> TurnRequest {
        let history: Vec<HistoryMessage> = transcript
            .conversation()
            .map(|message| {
                if message.author_id.as_deref() == Some(participant.persona.id.as_str()) {
                    HistoryMessage::assistant(message.text.clone())
                } else if let Some(author) = &message.author_name {
                    HistoryMessage::user(format!("{author}: {}", message.text))
                } else {
                    HistoryMessage::user(message.text.clone())
                }
            })
            .collect();

        TurnRequest::new(participant.system_prompt.clone(), history)
            .with_word_budget(self.environment.response_word_budget)
    }
}

/// Seeds a fresh transcript with the environment's starting prompt, if any.
fn seed_transcript(transcript: &mut Transcript, environment: &Environment) {
    if let Some(seed) = environment
        .seed_prompt
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        transcript.push(Message::system(seed));
    }
}
