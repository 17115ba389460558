//! External collaborator interfaces.
//!
//! The simulation engine does not implement storage or auth itself; it
//! consumes these traits. The `memory` submodule provides in-memory
//! reference implementations used by tests and by installations without a
//! remote backing store.

mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::environment::{CreateEnvironmentRequest, Environment};
use crate::error::Result;
use crate::persona::{CreatePersonaRequest, ModelProvider, Persona};

pub use memory::{MemoryCredentialStore, MemoryEnvironmentStore, MemoryPersonaStore};

/// An abstract store for persona records.
///
/// Implementations own validation-at-rest and id assignment; the engine only
/// reads persona snapshots out of environments.
#[async_trait]
pub trait PersonaStore: Send + Sync {
    /// Retrieves all personas.
    async fn list(&self) -> Result<Vec<Persona>>;

    /// Validates the request and creates a new persona.
    async fn create(&self, request: CreatePersonaRequest) -> Result<Persona>;

    /// Validates the request and replaces the persona's profile, keeping its
    /// id and source.
    async fn update(&self, id: &str, request: CreatePersonaRequest) -> Result<Persona>;

    /// Deletes a persona by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// An abstract store for environment records.
///
/// Create and update accept participant persona ids and return environments
/// with the participant list resolved to full persona records.
#[async_trait]
pub trait EnvironmentStore: Send + Sync {
    /// Retrieves all environments.
    async fn list(&self) -> Result<Vec<Environment>>;

    /// Validates the request, resolves participants, and creates a new
    /// environment.
    async fn create(&self, request: CreateEnvironmentRequest) -> Result<Environment>;

    /// Validates the request, resolves participants, and replaces the
    /// environment, keeping its id.
    async fn update(&self, id: &str, request: CreateEnvironmentRequest) -> Result<Environment>;

    /// Deletes an environment by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Non-secret metadata about a stored credential.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialInfo {
    pub provider: ModelProvider,
    /// Timestamp when the secret was stored (ISO 8601 format)
    pub created_at: String,
}

/// An abstract store for per-provider secrets.
///
/// Secrets are opaque to the engine and must never be logged or embedded in
/// error messages. `list` exposes metadata only.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Lists configured providers without exposing secret values.
    async fn list(&self) -> Result<Vec<CredentialInfo>>;

    /// Returns the secret for a provider, or `None` if not configured.
    async fn get(&self, provider: ModelProvider) -> Result<Option<String>>;

    /// Stores or replaces the secret for a provider.
    async fn set(&self, provider: ModelProvider, secret: String) -> Result<()>;

    /// Removes the secret for a provider.
    async fn delete(&self, provider: ModelProvider) -> Result<()>;

    /// Whether a secret is configured for a provider.
    async fn is_configured(&self, provider: ModelProvider) -> Result<bool> {
        Ok(self.get(provider).await?.is_some())
    }
}
