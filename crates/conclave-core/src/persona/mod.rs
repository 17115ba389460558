//! Persona domain module.
//!
//! This module contains all persona-related domain models, the fixed trait
//! taxonomy, request models for the authoring flow, and preset configurations.
//!
//! # Module Structure
//!
//! - `model`: Core persona domain models (`Persona`, `ModelProvider`, `PersonaSource`)
//! - `traits`: The build-time trait taxonomy (`TraitCategory`, `TraitIntensity`, `TraitAssignment`)
//! - `request`: Validated create/update request model
//! - `preset`: Default system personas

mod model;
mod preset;
mod request;
mod traits;

// Re-export public API
pub use model::{AttachedFile, KNOWLEDGE_MAX_CHARS, ModelProvider, Persona, PersonaSource};
pub use preset::get_default_presets;
pub use request::CreatePersonaRequest;
pub use traits::{TraitAssignment, TraitCategory, TraitIntensity};
