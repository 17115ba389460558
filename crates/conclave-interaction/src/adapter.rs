//! Model adapter contract shared by all provider variants.
//!
//! An adapter turns a [`TurnRequest`] (system prompt + mapped history +
//! response budget) into one reply string, or a typed failure the turn
//! engine degrades into a fallback reply.

use async_trait::async_trait;
use thiserror::Error;

use conclave_core::ConclaveError;
use conclave_core::environment::DEFAULT_WORD_BUDGET;
use conclave_core::persona::ModelProvider;

/// Role of a prior message, from the speaking persona's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRole {
    /// Anyone other than the speaker (user or other personas)
    User,
    /// The speaker's own earlier replies
    Assistant,
}

impl HistoryRole {
    /// Wire-format role name used by both provider request shapes.
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryRole::User => "user",
            HistoryRole::Assistant => "assistant",
        }
    }
}

/// One prior conversation message, already mapped to the speaker's point of
/// view by the turn engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryMessage {
    /// A message from someone other than the speaker.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }

    /// One of the speaker's own earlier replies.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything an adapter needs to produce one reply.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// The persona's system instruction
    pub system_prompt: String,
    /// Prior non-system messages, oldest first
    pub history: Vec<HistoryMessage>,
    /// Response budget, in generated tokens
    pub max_tokens: u32,
}

impl TurnRequest {
    /// Creates a request with the default response budget.
    pub fn new(system_prompt: impl Into<String>, history: Vec<HistoryMessage>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history,
            max_tokens: max_tokens_for_words(DEFAULT_WORD_BUDGET),
        }
    }

    /// Sets the response budget from an environment's word limit.
    pub fn with_word_budget(mut self, words: u32) -> Self {
        self.max_tokens = max_tokens_for_words(words);
        self
    }
}

/// Token allowance for a response budget given in words.
///
/// English prose averages roughly 1.3 tokens per word; two tokens per word
/// leaves headroom without letting replies balloon far past the budget.
pub fn max_tokens_for_words(words: u32) -> u32 {
    words.saturating_mul(2).max(64)
}

/// Errors produced by model adapters.
#[derive(Error, Debug, Clone)]
pub enum AdapterError {
    /// Provider selected but no secret configured; raised before any network call
    #[error("No credential configured for provider '{provider}'")]
    CredentialMissing { provider: ModelProvider },

    /// Non-success response or transport failure talking to the provider
    #[error("Provider error{}: {message}", match .status_code { Some(code) => format!(" ({code})"), None => String::new() })]
    Provider {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The provider responded but the body could not be interpreted
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// The provider responded without any text content
    #[error("Provider returned no text content")]
    EmptyResponse,
}

impl From<AdapterError> for ConclaveError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::CredentialMissing { provider } => {
                ConclaveError::credential_missing(provider.to_string())
            }
            AdapterError::Provider {
                status_code,
                message,
                ..
            } => ConclaveError::provider(status_code, message),
            AdapterError::Parse(message) => ConclaveError::provider(None, message),
            AdapterError::EmptyResponse => {
                ConclaveError::provider(None, "empty response".to_string())
            }
        }
    }
}

/// Polymorphic interface over the provider variants.
///
/// Resolved once per persona at session start (see
/// [`crate::resolve::resolve_adapter`]); the turn engine only ever calls
/// [`ModelAdapter::generate_reply`].
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// The provider this adapter speaks for.
    fn provider(&self) -> ModelProvider;

    /// Produces one in-character reply for the request.
    ///
    /// The only suspension point is the outbound network call, when one is
    /// made at all.
    async fn generate_reply(&self, request: &TurnRequest) -> Result<String, AdapterError>;
}

/// Stand-in adapter for a provider with no configured credential.
///
/// Fails immediately with [`AdapterError::CredentialMissing`]; never touches
/// the network. Keeps dispatch uniform so the engine treats a missing secret
/// like any other degradable adapter failure.
pub struct UnconfiguredAdapter {
    provider: ModelProvider,
}

impl UnconfiguredAdapter {
    pub fn new(provider: ModelProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ModelAdapter for UnconfiguredAdapter {
    fn provider(&self) -> ModelProvider {
        self.provider
    }

    async fn generate_reply(&self, _request: &TurnRequest) -> Result<String, AdapterError> {
        Err(AdapterError::CredentialMissing {
            provider: self.provider,
        })
    }
}
