use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::MessageId;

/// State-change notifications emitted by the chat widget so a frontend can
/// re-render without polling the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WidgetEvent {
    MessageAppended(MessageId),
    MessageUpdated(MessageId),
    ThinkingChanged(bool),
    SessionEnded,
    #[serde(other)]
    Unknown,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: WidgetEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
