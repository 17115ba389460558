//! In-memory reference store implementations.
//!
//! These back the store traits with process-local state. They are the
//! default wiring for tests and for installations that have no remote
//! backing store configured.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialInfo, CredentialStore, EnvironmentStore, PersonaStore};
use crate::environment::{CreateEnvironmentRequest, Environment};
use crate::error::{ConclaveError, Result};
use crate::persona::{CreatePersonaRequest, ModelProvider, Persona, get_default_presets};

/// In-memory persona store.
#[derive(Default)]
pub struct MemoryPersonaStore {
    personas: RwLock<Vec<Persona>>,
}

impl MemoryPersonaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the system preset personas.
    pub fn with_presets() -> Self {
        Self {
            personas: RwLock::new(get_default_presets()),
        }
    }
}

#[async_trait]
impl PersonaStore for MemoryPersonaStore {
    async fn list(&self) -> Result<Vec<Persona>> {
        Ok(self.personas.read().await.clone())
    }

    async fn create(&self, request: CreatePersonaRequest) -> Result<Persona> {
        request.validate()?;
        let persona = request.into_persona();

        let mut personas = self.personas.write().await;
        personas.push(persona.clone());
        Ok(persona)
    }

    async fn update(&self, id: &str, request: CreatePersonaRequest) -> Result<Persona> {
        request.validate()?;

        let mut personas = self.personas.write().await;
        let existing = personas
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ConclaveError::not_found("persona", id))?;

        existing.name = request.name;
        existing.provider = request.provider;
        existing.role = request.role;
        existing.traits = request.traits;
        existing.knowledge = request.knowledge;
        existing.attachments = request.attachments;

        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut personas = self.personas.write().await;
        let before = personas.len();
        personas.retain(|p| p.id != id);

        if personas.len() == before {
            return Err(ConclaveError::not_found("persona", id));
        }
        Ok(())
    }
}

/// In-memory environment store.
///
/// Resolves participant ids against a [`PersonaStore`] so stored
/// environments embed full persona records.
pub struct MemoryEnvironmentStore {
    environments: RwLock<Vec<Environment>>,
    personas: Arc<dyn PersonaStore>,
}

impl MemoryEnvironmentStore {
    /// Creates an empty store resolving participants through `personas`.
    pub fn new(personas: Arc<dyn PersonaStore>) -> Self {
        Self {
            environments: RwLock::new(Vec::new()),
            personas,
        }
    }

    async fn resolve_participants(&self, ids: &[String]) -> Result<Vec<Persona>> {
        let known = self.personas.list().await?;
        ids.iter()
            .map(|id| {
                known
                    .iter()
                    .find(|p| &p.id == id)
                    .cloned()
                    .ok_or_else(|| ConclaveError::not_found("persona", id.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl EnvironmentStore for MemoryEnvironmentStore {
    async fn list(&self) -> Result<Vec<Environment>> {
        Ok(self.environments.read().await.clone())
    }

    async fn create(&self, request: CreateEnvironmentRequest) -> Result<Environment> {
        request.validate()?;
        let participants = self.resolve_participants(&request.participant_ids).await?;
        let environment = request.into_environment(participants);

        let mut environments = self.environments.write().await;
        environments.push(environment.clone());
        Ok(environment)
    }

    async fn update(&self, id: &str, request: CreateEnvironmentRequest) -> Result<Environment> {
        request.validate()?;
        let participants = self.resolve_participants(&request.participant_ids).await?;

        let mut environments = self.environments.write().await;
        let existing = environments
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ConclaveError::not_found("environment", id))?;

        let mut updated = request.into_environment(participants);
        updated.id = existing.id.clone();
        *existing = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut environments = self.environments.write().await;
        let before = environments.len();
        environments.retain(|e| e.id != id);

        if environments.len() == before {
            return Err(ConclaveError::not_found("environment", id));
        }
        Ok(())
    }
}

struct StoredCredential {
    secret: String,
    created_at: String,
}

/// In-memory credential store.
///
/// Secrets live only in process memory and are never exposed through `list`.
#[derive(Default)]
pub struct MemoryCredentialStore {
    secrets: RwLock<HashMap<ModelProvider, StoredCredential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn list(&self) -> Result<Vec<CredentialInfo>> {
        let secrets = self.secrets.read().await;
        let mut infos: Vec<CredentialInfo> = secrets
            .iter()
            .map(|(provider, stored)| CredentialInfo {
                provider: *provider,
                created_at: stored.created_at.clone(),
            })
            .collect();
        infos.sort_by(|a, b| a.provider.to_string().cmp(&b.provider.to_string()));
        Ok(infos)
    }

    async fn get(&self, provider: ModelProvider) -> Result<Option<String>> {
        let secrets = self.secrets.read().await;
        Ok(secrets.get(&provider).map(|stored| stored.secret.clone()))
    }

    async fn set(&self, provider: ModelProvider, secret: String) -> Result<()> {
        let mut secrets = self.secrets.write().await;
        secrets.insert(
            provider,
            StoredCredential {
                secret,
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        Ok(())
    }

    async fn delete(&self, provider: ModelProvider) -> Result<()> {
        let mut secrets = self.secrets.write().await;
        secrets.remove(&provider);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::InteractionMode;

    fn persona_request(name: &str) -> CreatePersonaRequest {
        CreatePersonaRequest {
            name: name.to_string(),
            provider: ModelProvider::Simulated,
            role: "Speaker".to_string(),
            traits: Vec::new(),
            knowledge: String::new(),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_persona_store_crud() {
        let store = MemoryPersonaStore::new();

        let persona = store.create(persona_request("Ada")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);

        let mut edit = persona_request("Ada");
        edit.role = "Engineer".to_string();
        let updated = store.update(&persona.id, edit).await.unwrap();
        assert_eq!(updated.role, "Engineer");
        assert_eq!(updated.id, persona.id);

        store.delete(&persona.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.delete(&persona.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_persona_store_rejects_invalid_request() {
        let store = MemoryPersonaStore::new();
        let mut request = persona_request("");
        request.name = String::new();
        assert!(store.create(request).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_environment_store_resolves_participants() {
        let personas = Arc::new(MemoryPersonaStore::new());
        let ada = personas.create(persona_request("Ada")).await.unwrap();
        let brin = personas.create(persona_request("Brin")).await.unwrap();

        let store = MemoryEnvironmentStore::new(personas);
        let environment = store
            .create(CreateEnvironmentRequest {
                name: "Salon".to_string(),
                description: None,
                participant_ids: vec![ada.id.clone(), brin.id.clone()],
                mode: InteractionMode::Manual,
                response_word_budget: None,
                seed_prompt: None,
                moderated: false,
            })
            .await
            .unwrap();

        assert_eq!(environment.participant_names(), ["Ada", "Brin"]);
    }

    #[tokio::test]
    async fn test_environment_store_unknown_participant() {
        let personas = Arc::new(MemoryPersonaStore::new());
        let store = MemoryEnvironmentStore::new(personas);

        let err = store
            .create(CreateEnvironmentRequest {
                name: "Salon".to_string(),
                description: None,
                participant_ids: vec!["missing".to_string()],
                mode: InteractionMode::AutoLoop,
                response_word_budget: None,
                seed_prompt: None,
                moderated: false,
            })
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_credential_store_never_lists_secrets() {
        let store = MemoryCredentialStore::new();
        store
            .set(ModelProvider::OpenAi, "sk-secret-value".to_string())
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].provider, ModelProvider::OpenAi);
        assert!(serde_json::to_string(&listed).unwrap().find("sk-secret-value").is_none());

        assert!(store.is_configured(ModelProvider::OpenAi).await.unwrap());
        assert!(!store.is_configured(ModelProvider::Anthropic).await.unwrap());

        store.delete(ModelProvider::OpenAi).await.unwrap();
        assert_eq!(
            store.get(ModelProvider::OpenAi).await.unwrap(),
            None
        );
    }
}
