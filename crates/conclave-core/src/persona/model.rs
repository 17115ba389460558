//! Persona domain model.
//!
//! Represents LLM-backed characters that participate in simulated
//! conversations. Personas are authored externally and are read-only from the
//! simulation engine's point of view.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::traits::{TraitAssignment, TraitCategory, TraitIntensity};

/// Maximum length of the knowledge/background blob, in characters.
pub const KNOWLEDGE_MAX_CHARS: usize = 2500;

/// Supported LLM providers backing a persona.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelProvider {
    /// Chat-completion style endpoint (system + message array, choice field)
    OpenAi,
    /// Message-completion style endpoint (system field + message array, content field)
    Anthropic,
    /// Offline provider producing canned in-character replies, no network
    Simulated,
}

impl Default for ModelProvider {
    fn default() -> Self {
        ModelProvider::Simulated
    }
}

/// Represents the source of a persona (system-provided or user-created).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum PersonaSource {
    /// System-provided default personas
    System,
    /// User-created custom personas
    User,
}

impl Default for PersonaSource {
    fn default() -> Self {
        PersonaSource::User
    }
}

/// Reference to a file attached to a persona.
///
/// Only the name and size are modeled; file content lives with the external
/// store and never reaches the engine.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub name: String,
    pub size: u64,
}

/// A persona representing an LLM-backed character with a fixed profile.
///
/// Personas define the identity, trait mix, and background knowledge of the
/// characters participating in a simulation. Each persona has a unique UUID
/// identifier. Name, provider, and role are mandatory once persisted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Persona {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name of the persona
    pub name: String,
    /// LLM provider used to generate this persona's replies
    pub provider: ModelProvider,
    /// Role or function description
    pub role: String,
    /// Ordered trait assignments (at most one per (category, trait) pair)
    #[serde(default)]
    pub traits: Vec<TraitAssignment>,
    /// Free-text knowledge/background blob (bounded by [`KNOWLEDGE_MAX_CHARS`])
    #[serde(default)]
    pub knowledge: String,
    /// Attached file references (name and size only)
    #[serde(default)]
    pub attachments: Vec<AttachedFile>,
    /// Source of the persona (System or User)
    #[serde(default)]
    pub source: PersonaSource,
}

impl Persona {
    /// Looks up the intensity assigned to a (category, trait) pair, if any.
    ///
    /// Trait names are matched case-insensitively. Uniqueness of the pair is
    /// enforced at authoring time, so the first match is the only match.
    pub fn trait_intensity(&self, category: TraitCategory, name: &str) -> Option<TraitIntensity> {
        self.traits
            .iter()
            .find(|t| t.category == category && t.name.eq_ignore_ascii_case(name))
            .map(|t| t.intensity)
    }
}
