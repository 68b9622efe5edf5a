//! Auth provider backed by the storefront's stored credentials.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::{AuthError, AuthProvider, AuthSession};

/// Reads the storefront's current auth session from the environment or the
/// credentials file the storefront writes at login.
///
/// Resolution order:
/// 1. `SWISH_ACCESS_TOKEN` env var (`SWISH_USER_ID` names the user)
/// 2. `~/.swish/credentials.json`
pub struct StoredCredentials {
    path: Option<PathBuf>,
}

impl StoredCredentials {
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Override the credentials file location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".swish").join("credentials.json"))
    }

    fn from_env() -> Option<AuthSession> {
        let token = std::env::var("SWISH_ACCESS_TOKEN").ok()?;
        if token.is_empty() {
            return None;
        }
        let user_id = std::env::var("SWISH_USER_ID").unwrap_or_else(|_| "unknown".into());
        Some(AuthSession {
            access_token: token,
            user_id,
        })
    }

    /// Parse the credentials file written by the storefront at login:
    /// `{"session": {"accessToken": "...", "userId": "..."}}`.
    fn parse(data: &str) -> Option<AuthSession> {
        let json: serde_json::Value = serde_json::from_str(data).ok()?;
        let session = json.get("session")?;
        let access_token = session.get("accessToken")?.as_str()?;
        if access_token.is_empty() {
            return None;
        }
        let user_id = session
            .get("userId")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        Some(AuthSession {
            access_token: access_token.to_string(),
            user_id: user_id.to_string(),
        })
    }
}

impl Default for StoredCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for StoredCredentials {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        if let Some(session) = Self::from_env() {
            debug!(user = %session.user_id, "auth session from environment");
            return Ok(Some(session));
        }

        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| AuthError::Lookup(format!("{}: {e}", path.display())))?;
        match Self::parse(&data) {
            Some(session) => {
                debug!(user = %session.user_id, "auth session from credentials file");
                Ok(Some(session))
            }
            None => Err(AuthError::Lookup(format!(
                "malformed credentials file: {}",
                path.display()
            ))),
        }
    }
}
