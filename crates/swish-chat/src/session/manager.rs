//! ChatSession struct and lifecycle management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use swish_common::{EventBus, Message, SessionId, WidgetEvent};

use crate::{AuthProvider, ChatTransport};

use super::transcript::Transcript;

/// One open chat widget: fixed session identity, optional bearer
/// credential, the transcript, and a teardown token.
pub struct ChatSession {
    /// Generated once at construction, never rotated.
    pub(super) session_id: SessionId,
    /// Bearer credential; populated at most once.
    pub(super) credential: OnceLock<String>,
    /// Shared with reveal tasks, which mutate the active target in place.
    pub(super) transcript: Arc<Mutex<Transcript>>,
    /// True while a chat request is in flight.
    pub(super) thinking: AtomicBool,
    pub(super) bus: EventBus,
    /// Cancelled on close; aborts pending requests and reveal timers.
    pub(super) shutdown: CancellationToken,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            credential: OnceLock::new(),
            transcript: Arc::new(Mutex::new(Transcript::new())),
            thinking: AtomicBool::new(false),
            bus: EventBus::new(64),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.bus.subscribe()
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::Acquire)
    }

    pub(super) fn set_thinking(&self, on: bool) {
        if self.thinking.swap(on, Ordering::AcqRel) != on {
            self.bus.publish(WidgetEvent::ThinkingChanged(on));
        }
    }

    pub fn bearer(&self) -> Option<&str> {
        self.credential.get().map(String::as_str)
    }

    /// Attach the bearer credential. First write wins; later calls are
    /// ignored so the credential stays fixed for the widget's lifetime.
    pub fn attach_credential(&self, token: impl Into<String>) {
        if self.credential.set(token.into()).is_err() {
            debug!("credential already attached, ignoring");
        }
    }

    /// Query the auth collaborator once and attach its token when a session
    /// exists. Failures are logged and leave the chat anonymous.
    pub async fn connect_auth(&self, provider: &dyn AuthProvider) {
        match provider.current_session().await {
            Ok(Some(auth)) => {
                debug!(user = %auth.user_id, "authenticated session found");
                self.attach_credential(auth.access_token);
            }
            Ok(None) => debug!("no authenticated session, continuing anonymous"),
            Err(e) => warn!(error = %e, "auth lookup failed, continuing anonymous"),
        }
    }

    /// Snapshot of the transcript for rendering.
    pub async fn messages(&self) -> Vec<Message> {
        self.transcript.lock().await.messages().to_vec()
    }

    pub async fn message_count(&self) -> usize {
        self.transcript.lock().await.len()
    }

    /// Tear the widget down: abort any pending request and reveal timer.
    /// Idempotent; the session-ended event is published once.
    pub async fn close(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        self.transcript.lock().await.invalidate_reveal();
        self.bus.publish(WidgetEvent::SessionEnded);
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Fire the end-of-session signal without awaiting delivery.
    ///
    /// Best effort with no confirmation: the page may be going away, so
    /// failures are swallowed at debug level and nothing is retried. The
    /// returned handle lets a caller bound its wait; the signal itself
    /// never blocks teardown.
    pub fn end_session_in_background(
        &self,
        transport: Arc<dyn ChatTransport>,
    ) -> tokio::task::JoinHandle<()> {
        let session_id = self.session_id.clone();
        let bearer = self.credential.get().cloned();
        tokio::spawn(async move {
            if let Err(e) = transport
                .end_session(&session_id, bearer.as_deref())
                .await
            {
                debug!(session = %session_id, error = %e, "end-of-session signal failed");
            }
        })
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
