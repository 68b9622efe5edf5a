//! Chat widget core for the Swish storefront.
//!
//! Implements the interaction logic behind the storefront's support chat:
//! - Client-generated session identity (one opaque id per widget lifetime)
//! - Message exchange against the chat backend (`POST /chat`)
//! - Progressive reveal of complete responses to emulate token streaming
//! - Best-effort end-of-session signal on teardown
//!
//! The backend and the storefront's auth provider are collaborators behind
//! the [`ChatTransport`] and [`AuthProvider`] seams; [`BackendClient`] and
//! [`StoredCredentials`] are the production implementations.

pub mod auth;
pub mod backend;
pub mod session;

use std::fmt;

use async_trait::async_trait;
use swish_common::SessionId;

pub use auth::StoredCredentials;
pub use backend::{BackendClient, BackendConfig};
pub use session::{ChatSession, ERROR_PREFIX};

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one user message and resolve to the complete response text.
    /// Exactly one request per call; the caller never retries.
    async fn send_message(
        &self,
        message: &str,
        session_id: &SessionId,
        bearer: Option<&str>,
    ) -> Result<String, ChatError>;

    /// Signal that the session is over. Best-effort: callers fire this
    /// without awaiting delivery and ignore the outcome.
    async fn end_session(
        &self,
        session_id: &SessionId,
        bearer: Option<&str>,
    ) -> Result<(), ChatError>;
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Return the storefront's current authenticated session, if any.
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError>;
}

/// An authenticated storefront session obtained from the auth provider.
#[derive(Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: String,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth lookup error: {0}")]
    Lookup(String),
}
