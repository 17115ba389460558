//! Environment domain model.

use serde::{Deserialize, Serialize};

use crate::persona::Persona;

/// Lower bound of the response length budget, in words.
pub const MIN_WORD_BUDGET: u32 = 50;
/// Upper bound of the response length budget, in words.
pub const MAX_WORD_BUDGET: u32 = 500;
/// Response length budget used when an environment does not set one.
pub const DEFAULT_WORD_BUDGET: u32 = 200;

/// How turns are driven within an environment.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// The scheduler advances turns automatically in round-robin order
    AutoLoop,
    /// Each turn is triggered explicitly by the user
    Manual,
    /// Auto-loop with user messages injected between turns
    Mixed,
}

impl Default for InteractionMode {
    fn default() -> Self {
        InteractionMode::AutoLoop
    }
}

/// A named group of personas plus an interaction policy.
///
/// Environments are authored externally and read-only to the engine. The
/// participant list is a snapshot of full persona records, resolved by the
/// environment store; it must be non-empty for an active simulation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Environment {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Human-readable environment name
    pub name: String,
    /// Optional description of the scenario
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered participant personas (turn order follows this list)
    pub participants: Vec<Persona>,
    /// Interaction mode
    #[serde(default)]
    pub mode: InteractionMode,
    /// Response length budget in words, within
    /// [`MIN_WORD_BUDGET`]..=[`MAX_WORD_BUDGET`]
    #[serde(default = "default_word_budget")]
    pub response_word_budget: u32,
    /// Optional starting prompt seeded into the transcript as a system message
    #[serde(default)]
    pub seed_prompt: Option<String>,
    /// Whether a human moderator participates in the conversation
    #[serde(default)]
    pub moderated: bool,
}

fn default_word_budget() -> u32 {
    DEFAULT_WORD_BUDGET
}

impl Environment {
    /// Ordered display names of the participants.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    /// Finds a participant by persona id.
    pub fn participant(&self, persona_id: &str) -> Option<&Persona> {
        self.participants.iter().find(|p| p.id == persona_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_budget_default_on_deserialize() {
        let environment: Environment = serde_json::from_str(
            r#"{"id": "e1", "name": "Salon", "participants": []}"#,
        )
        .unwrap();
        assert_eq!(environment.response_word_budget, DEFAULT_WORD_BUDGET);
        assert_eq!(environment.mode, InteractionMode::AutoLoop);
        assert!(environment.seed_prompt.is_none());
    }
}
