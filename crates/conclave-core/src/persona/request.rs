//! Persona creation and update request models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{AttachedFile, KNOWLEDGE_MAX_CHARS, ModelProvider, Persona, PersonaSource};
use super::traits::TraitAssignment;
use crate::error::{ConclaveError, Result};

/// Request to create or update a persona.
///
/// This is the unified request model used by the persona authoring flow;
/// the same shape serves both `create` and `update` on a persona store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonaRequest {
    /// Display name (required)
    pub name: String,

    /// LLM provider backing this persona (required)
    pub provider: ModelProvider,

    /// Role or function description (required)
    pub role: String,

    /// Ordered trait assignments
    #[serde(default)]
    pub traits: Vec<TraitAssignment>,

    /// Free-text knowledge blob, at most [`KNOWLEDGE_MAX_CHARS`] characters
    #[serde(default)]
    pub knowledge: String,

    /// Attached file references (name and size only)
    #[serde(default)]
    pub attachments: Vec<AttachedFile>,
}

impl CreatePersonaRequest {
    /// Validate the request and return an error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConclaveError::validation("Name is required and cannot be empty"));
        }

        if self.role.trim().is_empty() {
            return Err(ConclaveError::validation("Role is required and cannot be empty"));
        }

        if self.knowledge.chars().count() > KNOWLEDGE_MAX_CHARS {
            return Err(ConclaveError::validation(format!(
                "Knowledge must be at most {KNOWLEDGE_MAX_CHARS} characters"
            )));
        }

        for (index, assignment) in self.traits.iter().enumerate() {
            if !assignment.category.contains(&assignment.name) {
                return Err(ConclaveError::validation(format!(
                    "Unknown trait '{}' in category {}",
                    assignment.name, assignment.category
                )));
            }

            let duplicate = self.traits[..index].iter().any(|earlier| {
                earlier.category == assignment.category
                    && earlier.name.eq_ignore_ascii_case(&assignment.name)
            });
            if duplicate {
                return Err(ConclaveError::validation(format!(
                    "Trait '{}' assigned more than once in category {}",
                    assignment.name, assignment.category
                )));
            }
        }

        Ok(())
    }

    /// Convert this request into a Persona, always generating a new UUID.
    pub fn into_persona(self) -> Persona {
        Persona {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            provider: self.provider,
            role: self.role,
            traits: self.traits,
            knowledge: self.knowledge,
            attachments: self.attachments,
            source: PersonaSource::User,
        }
    }

    /// Create a request from an existing Persona (for editing).
    pub fn from_persona(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            provider: persona.provider,
            role: persona.role.clone(),
            traits: persona.traits.clone(),
            knowledge: persona.knowledge.clone(),
            attachments: persona.attachments.clone(),
        }
    }
}
