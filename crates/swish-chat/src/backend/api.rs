//! ChatTransport trait implementation for BackendClient.

use async_trait::async_trait;
use swish_common::SessionId;
use tracing::debug;

use crate::{ChatError, ChatTransport};

use super::client::BackendClient;

#[async_trait]
impl ChatTransport for BackendClient {
    async fn send_message(
        &self,
        message: &str,
        session_id: &SessionId,
        bearer: Option<&str>,
    ) -> Result<String, ChatError> {
        let body = self.chat_body(message, session_id);

        debug!(session = %session_id, authed = bearer.is_some(), "chat request");

        let mut request = self.http.post(self.chat_url()).json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        // The backend reports failures through the body (`detail`), not the
        // status line, so the body is parsed regardless of status.
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        self.parse_chat_response(json)
    }

    async fn end_session(
        &self,
        session_id: &SessionId,
        bearer: Option<&str>,
    ) -> Result<(), ChatError> {
        let body = self.end_session_body(session_id);

        debug!(session = %session_id, "end-of-session signal");

        let mut request = self.http.delete(self.end_session_url()).json(&body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        // Response body is ignored per the backend contract.
        Ok(())
    }
}
