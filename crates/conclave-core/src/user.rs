//! User identity module.
//!
//! The engine itself has no notion of accounts; this seam exists so the
//! surrounding application can gate simulations on a signed-in user and
//! react to auth-state changes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{ConclaveError, Result};

/// A signed-in user.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Sign-in email address
    pub email: String,
    /// Optional display name
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Session/identity collaborator.
///
/// Implementations must never log or surface passwords.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the currently signed-in user, if any.
    async fn current_user(&self) -> Option<UserIdentity>;

    /// Signs a user in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity>;

    /// Registers and signs in a new user.
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity>;

    /// Signs the current user out.
    async fn sign_out(&self) -> Result<()>;

    /// Subscribes to auth-state changes. The receiver yields the new current
    /// user (or `None` after sign-out) on every change.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;
}

/// Process-local identity provider.
///
/// Accepts any non-empty email/password pair and keeps the session in
/// memory. Used by tests and by installations without a remote identity
/// backend.
pub struct StaticIdentityProvider {
    state: watch::Sender<Option<UserIdentity>>,
}

impl StaticIdentityProvider {
    /// Creates a provider with no signed-in user.
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }
}

impl Default for StaticIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self) -> Option<UserIdentity> {
        self.state.borrow().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ConclaveError::Auth(
                "Email and password are required".to_string(),
            ));
        }

        let user = UserIdentity {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: None,
        };
        let _ = self.state.send(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity> {
        self.sign_in(email, password).await
    }

    async fn sign_out(&self) -> Result<()> {
        let _ = self.state.send(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.state.subscribe()
    }
}
