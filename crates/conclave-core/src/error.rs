//! Error types for the Conclave simulation engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Conclave crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ConclaveError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// Malformed persona/environment input from an authoring flow
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store collaborator (persona/environment/credential) failed
    #[error("Store error: {0}")]
    Store(String),

    /// A provider was selected but no secret is configured for it
    #[error("No credential configured for provider '{provider}'")]
    CredentialMissing { provider: String },

    /// Non-success response from an external model endpoint
    #[error("Provider error{}: {message}", match .status_code { Some(code) => format!(" ({code})"), None => String::new() })]
    Provider {
        status_code: Option<u16>,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Authentication/identity error
    #[error("Auth error: {0}")]
    Auth(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConclaveError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates a CredentialMissing error
    pub fn credential_missing(provider: impl Into<String>) -> Self {
        Self::CredentialMissing {
            provider: provider.into(),
        }
    }

    /// Creates a Provider error
    pub fn provider(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Provider {
            status_code,
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is recoverable by degrading to a fallback reply.
    ///
    /// Returns true for the two adapter-level failures the turn engine converts
    /// into non-live transcript messages instead of aborting the run.
    pub fn is_degradable(&self) -> bool {
        matches!(self, Self::CredentialMissing { .. } | Self::Provider { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for ConclaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConclaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, ConclaveError>`.
pub type Result<T> = std::result::Result<T, ConclaveError>;
