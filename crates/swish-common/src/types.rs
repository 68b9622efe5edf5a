use serde::{Deserialize, Serialize};

/// Monotonic per-session message identifier. Allocated by the transcript,
/// never reused within a widget lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the chat transcript. Append-only, except that the content
/// of the active reveal target grows in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_ordering() {
        assert!(MessageId(1) < MessageId(2));
        assert_eq!(MessageId(7), MessageId(7));
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn message_round_trips() {
        let msg = Message {
            id: MessageId(3),
            content: "hello".into(),
            sender: Sender::Bot,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.content, "hello");
        assert_eq!(back.sender, Sender::Bot);
    }
}
