//! Environment creation and update request models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{
    DEFAULT_WORD_BUDGET, Environment, InteractionMode, MAX_WORD_BUDGET, MIN_WORD_BUDGET,
};
use crate::error::{ConclaveError, Result};
use crate::persona::Persona;

/// Request to create or update an environment.
///
/// Participants are referenced by persona id; the environment store resolves
/// them to full persona records before building the [`Environment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnvironmentRequest {
    /// Environment name (required)
    pub name: String,

    /// Optional description of the scenario
    #[serde(default)]
    pub description: Option<String>,

    /// Ordered participant persona ids (required, non-empty)
    pub participant_ids: Vec<String>,

    /// Interaction mode
    #[serde(default)]
    pub mode: InteractionMode,

    /// Response length budget in words; defaults to [`DEFAULT_WORD_BUDGET`]
    #[serde(default)]
    pub response_word_budget: Option<u32>,

    /// Optional starting prompt
    #[serde(default)]
    pub seed_prompt: Option<String>,

    /// Whether a human moderator participates
    #[serde(default)]
    pub moderated: bool,
}

impl CreateEnvironmentRequest {
    /// Validate the request and return an error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConclaveError::validation("Name is required and cannot be empty"));
        }

        if self.participant_ids.is_empty() {
            return Err(ConclaveError::validation(
                "An environment needs at least one participant",
            ));
        }

        if let Some(budget) = self.response_word_budget {
            if !(MIN_WORD_BUDGET..=MAX_WORD_BUDGET).contains(&budget) {
                return Err(ConclaveError::validation(format!(
                    "Response word budget must be between {MIN_WORD_BUDGET} and {MAX_WORD_BUDGET}"
                )));
            }
        }

        Ok(())
    }

    /// Build the environment from this request and the resolved participants.
    ///
    /// `participants` must be the records for `participant_ids`, in the same
    /// order; resolution is the store's job.
    pub fn into_environment(self, participants: Vec<Persona>) -> Environment {
        Environment {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            participants,
            mode: self.mode,
            response_word_budget: self.response_word_budget.unwrap_or(DEFAULT_WORD_BUDGET),
            seed_prompt: self.seed_prompt,
            moderated: self.moderated,
        }
    }
}
