//! Backend client struct, request building, and response parsing.

use swish_common::SessionId;

use crate::ChatError;

use super::config::BackendConfig;

/// Shown to the user when a 2xx body arrives without a usable `response`
/// field and the payload carries no `detail` either.
pub(crate) const GENERIC_FAILURE: &str = "No response received from server";

/// Chat backend HTTP client.
pub struct BackendClient {
    pub(crate) config: BackendConfig,
    pub(crate) http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, http }
    }

    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat", self.config.base_url.trim_end_matches('/'))
    }

    pub(crate) fn end_session_url(&self) -> String {
        format!(
            "{}/chat/end_session",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the JSON body for `POST /chat`.
    pub(crate) fn chat_body(&self, message: &str, session_id: &SessionId) -> serde_json::Value {
        serde_json::json!({
            "message": message,
            "session_id": session_id,
        })
    }

    /// Build the JSON body for `DELETE /chat/end_session`.
    pub(crate) fn end_session_body(&self, session_id: &SessionId) -> serde_json::Value {
        serde_json::json!({
            "session_id": session_id,
        })
    }

    /// Extract the response text from a chat reply body.
    ///
    /// The backend contract makes no distinction between statuses: a usable
    /// reply is any JSON object with a non-empty string `response`. Anything
    /// else is a failure carrying the payload's `detail`, or the generic
    /// message when no detail exists.
    pub(crate) fn parse_chat_response(&self, json: serde_json::Value) -> Result<String, ChatError> {
        match json.get("response").and_then(|v| v.as_str()) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => {
                let detail = json
                    .get("detail")
                    .and_then(|v| v.as_str())
                    .unwrap_or(GENERIC_FAILURE);
                Err(ChatError::Api(detail.to_string()))
            }
        }
    }
}
