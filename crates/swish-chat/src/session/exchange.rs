//! The submit control loop: one user message, one network call, then a
//! reveal or an error message.

use std::sync::Arc;

use tracing::{debug, warn};

use swish_common::{new_correlation_id, WidgetEvent};

use crate::ChatTransport;

use super::manager::ChatSession;
use super::reveal;

/// Prefix of the Bot message shown when an exchange fails.
pub const ERROR_PREFIX: &str = "Sorry, I couldn't process your request at this time. Error: ";

impl ChatSession {
    /// Submit user text. Empty or whitespace-only input is a no-op.
    ///
    /// Appends the user message before the network call begins, sets the
    /// thinking flag for the duration of the call, and always clears it
    /// before any resulting message is appended. Failures surface as a
    /// single Bot message; nothing is retried and nothing escapes to the
    /// caller. Overlapping submits are not serialized; a newer exchange
    /// simply takes over the reveal slot.
    pub async fn submit(&self, transport: &dyn ChatTransport, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }
        if self.is_closed() {
            debug!("session closed, dropping submit");
            return;
        }

        let correlation = new_correlation_id();
        {
            let mut transcript = self.transcript.lock().await;
            transcript.invalidate_reveal();
            let id = transcript.push_user(text);
            self.bus.publish(WidgetEvent::MessageAppended(id));
        }
        self.set_thinking(true);
        debug!(%correlation, session = %self.session_id, "chat exchange started");

        let result = tokio::select! {
            _ = self.shutdown.cancelled() => {
                self.set_thinking(false);
                debug!(%correlation, "session closed while awaiting response");
                return;
            }
            r = transport.send_message(text, &self.session_id, self.bearer()) => r,
        };

        match result {
            Ok(response) => {
                self.set_thinking(false);
                let handle = {
                    let mut transcript = self.transcript.lock().await;
                    let handle = transcript.begin_reveal();
                    self.bus.publish(WidgetEvent::MessageAppended(handle.message_id()));
                    handle
                };
                debug!(%correlation, chars = response.chars().count(), "response received, revealing");
                reveal::spawn_reveal(
                    Arc::clone(&self.transcript),
                    self.bus.clone(),
                    handle,
                    response,
                    self.shutdown.child_token(),
                );
            }
            Err(e) => {
                self.set_thinking(false);
                warn!(%correlation, error = %e, "chat exchange failed");
                let mut transcript = self.transcript.lock().await;
                let id = transcript.push_bot(format!("{ERROR_PREFIX}{e}"));
                self.bus.publish(WidgetEvent::MessageAppended(id));
            }
        }
    }
}
