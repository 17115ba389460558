//! End-to-end flow: author personas and an environment through the stores,
//! run a simulation, inject a user message, take a manual turn, and export
//! the transcript.

use std::sync::Arc;
use std::time::Duration;

use conclave_core::environment::{CreateEnvironmentRequest, InteractionMode};
use conclave_core::export::{TranscriptExport, export_transcript};
use conclave_core::persona::{
    CreatePersonaRequest, ModelProvider, TraitAssignment, TraitCategory, TraitIntensity,
};
use conclave_core::store::{
    EnvironmentStore, MemoryCredentialStore, MemoryEnvironmentStore, MemoryPersonaStore,
    PersonaStore,
};
use conclave_core::transcript::MessageKind;
use conclave_engine::{EngineConfig, EnginePhase, SimulationEngine, TurnOutcome};

fn persona_request(name: &str, provider: ModelProvider) -> CreatePersonaRequest {
    CreatePersonaRequest {
        name: name.to_string(),
        provider,
        role: "Salon guest".to_string(),
        traits: vec![TraitAssignment::new(
            TraitCategory::Cognition,
            "curious",
            TraitIntensity::Strong,
        )],
        knowledge: "A regular at the salon with strong opinions.".to_string(),
        attachments: Vec::new(),
    }
}

fn fast_engine() -> SimulationEngine {
    SimulationEngine::with_config(
        Arc::new(MemoryCredentialStore::new()),
        EngineConfig::default()
            .with_rounds(2)
            .with_turn_delay(Duration::ZERO),
    )
}

#[tokio::test]
async fn test_full_simulation_flow() {
    // author two personas through the store
    let personas = Arc::new(MemoryPersonaStore::new());
    let ada = personas
        .create(persona_request("Ada", ModelProvider::Simulated))
        .await
        .unwrap();
    let brin = personas
        .create(persona_request("Brin", ModelProvider::Simulated))
        .await
        .unwrap();

    // compose an environment with both of them
    let environments = MemoryEnvironmentStore::new(personas.clone());
    let environment = environments
        .create(CreateEnvironmentRequest {
            name: "Evening Salon".to_string(),
            description: Some("An informal evening discussion".to_string()),
            participant_ids: vec![ada.id.clone(), brin.id.clone()],
            mode: InteractionMode::Mixed,
            response_word_budget: Some(120),
            seed_prompt: Some("Welcome. Tonight's topic: the future of libraries.".to_string()),
            moderated: false,
        })
        .await
        .unwrap();

    // run the auto-loop
    let engine = fast_engine();
    let session = engine.select_environment(environment).await.unwrap();
    session.run_auto_loop().await.unwrap();

    let transcript = session.transcript().await;
    // seed message plus 2 rounds x 2 participants
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript.messages()[0].kind, MessageKind::System);

    let authors: Vec<&str> = transcript
        .agent_messages()
        .map(|m| m.author_name.as_deref().unwrap())
        .collect();
    assert_eq!(authors, ["Ada", "Brin", "Ada", "Brin"]);
    assert!(transcript.agent_messages().all(|m| m.live));

    // mixed mode: inject a user message, then take a manual turn
    session.post_user_message("What does everyone think?").await;
    let outcome = session.speak(&ada.id).await.unwrap();
    assert_eq!(outcome, TurnOutcome::Spoke { live: true });

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 7);

    // export round-trip reproduces every message in order
    let export = export_transcript(session.environment(), &transcript);
    let json = export.to_json_pretty().unwrap();
    let parsed: TranscriptExport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.environment, "Evening Salon");
    assert_eq!(parsed.participants, ["Ada", "Brin"]);
    assert_eq!(parsed.messages, transcript.messages().to_vec());
    assert!(export.suggested_file_name().starts_with("evening-salon-"));

    // leaving the simulation view discards the session
    engine.clear_session().await;
    assert_eq!(engine.phase().await, EnginePhase::Idle);
}

#[tokio::test]
async fn test_unconfigured_provider_degrades_but_run_completes() {
    let personas = Arc::new(MemoryPersonaStore::new());
    let cass = personas
        .create(persona_request("Cass", ModelProvider::Anthropic))
        .await
        .unwrap();

    let environments = MemoryEnvironmentStore::new(personas.clone());
    let environment = environments
        .create(CreateEnvironmentRequest {
            name: "Solo Stage".to_string(),
            description: None,
            participant_ids: vec![cass.id.clone()],
            mode: InteractionMode::AutoLoop,
            response_word_budget: None,
            seed_prompt: None,
            moderated: false,
        })
        .await
        .unwrap();

    // no anthropic credential is configured, so every turn degrades
    let engine = fast_engine();
    let session = engine.select_environment(environment).await.unwrap();
    session.run_auto_loop().await.unwrap();

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    for message in transcript.agent_messages() {
        assert!(!message.live);
        assert!(message.text.contains("anthropic"));
        assert!(message.text.contains("Cass"));
    }
    assert_eq!(session.rounds_completed().await, 2);
}
