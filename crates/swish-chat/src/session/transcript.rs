//! Append-only message transcript with a single reveal slot.

use swish_common::{Message, MessageId, Sender};

/// Stable handle to the Bot message a reveal is allowed to write.
///
/// Captured when the placeholder is appended; a newer exchange takes over
/// the slot and every tick holding a stale handle becomes a no-op. This
/// replaces "find the last message and mutate it", which breaks as soon as
/// two reveals overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RevealHandle {
    message_id: MessageId,
}

impl RevealHandle {
    pub(crate) fn message_id(&self) -> MessageId {
        self.message_id
    }
}

/// The widget's in-memory message sequence. Append-only, except that the
/// active reveal target's content grows in place.
pub(crate) struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
    active_reveal: Option<MessageId>,
}

impl Transcript {
    pub(crate) fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
            active_reveal: None,
        }
    }

    fn alloc_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn push_user(&mut self, content: impl Into<String>) -> MessageId {
        let id = self.alloc_id();
        self.messages.push(Message {
            id,
            content: content.into(),
            sender: Sender::User,
        });
        id
    }

    pub(crate) fn push_bot(&mut self, content: impl Into<String>) -> MessageId {
        let id = self.alloc_id();
        self.messages.push(Message {
            id,
            content: content.into(),
            sender: Sender::Bot,
        });
        id
    }

    /// Append an empty Bot placeholder and make it the active reveal target.
    pub(crate) fn begin_reveal(&mut self) -> RevealHandle {
        let id = self.push_bot("");
        self.active_reveal = Some(id);
        RevealHandle { message_id: id }
    }

    /// Invalidate any outstanding reveal handle. Called when a new exchange
    /// starts and on teardown; ticks holding the old handle become no-ops.
    pub(crate) fn invalidate_reveal(&mut self) {
        self.active_reveal = None;
    }

    /// Release the slot once the reveal has written its final step.
    pub(crate) fn finish_reveal(&mut self, handle: RevealHandle) {
        if self.active_reveal == Some(handle.message_id) {
            self.active_reveal = None;
        }
    }

    /// Set the visible content of the reveal target. Returns false without
    /// touching anything when the handle is stale, the message is gone, or
    /// the target is not a Bot message (the last case is a guard against
    /// missequencing, not a recoverable state).
    pub(crate) fn apply_reveal(&mut self, handle: RevealHandle, content: &str) -> bool {
        if self.active_reveal != Some(handle.message_id) {
            return false;
        }
        let Some(message) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.id == handle.message_id)
        else {
            return false;
        };
        if message.sender != Sender::Bot {
            return false;
        }
        message.content = content.to_string();
        true
    }

    pub(crate) fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut t = Transcript::new();
        let a = t.push_user("one");
        let b = t.push_bot("two");
        let c = t.push_user("three");
        assert!(a < b && b < c);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn begin_reveal_appends_empty_bot_placeholder() {
        let mut t = Transcript::new();
        t.push_user("hi");
        let handle = t.begin_reveal();

        let last = t.messages().last().unwrap();
        assert_eq!(last.id, handle.message_id());
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.content, "");
    }

    #[test]
    fn apply_reveal_updates_target_in_place() {
        let mut t = Transcript::new();
        t.push_user("hi");
        let handle = t.begin_reveal();

        assert!(t.apply_reveal(handle, "Hello"));
        assert!(t.apply_reveal(handle, "Hello worl"));
        assert_eq!(t.messages().last().unwrap().content, "Hello worl");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut t = Transcript::new();
        let first = t.begin_reveal();
        assert!(t.apply_reveal(first, "par"));

        // A new exchange takes over the slot.
        t.invalidate_reveal();
        t.push_user("again");
        let second = t.begin_reveal();

        assert!(!t.apply_reveal(first, "partial overwritten"));
        assert!(t.apply_reveal(second, "fresh"));
        assert_eq!(t.messages()[0].content, "par");
        assert_eq!(t.messages().last().unwrap().content, "fresh");
    }

    #[test]
    fn finish_reveal_releases_the_slot() {
        let mut t = Transcript::new();
        let handle = t.begin_reveal();
        assert!(t.apply_reveal(handle, "done"));

        t.finish_reveal(handle);
        assert!(!t.apply_reveal(handle, "late tick"));
        assert_eq!(t.messages().last().unwrap().content, "done");
    }

    #[test]
    fn finish_with_stale_handle_keeps_newer_slot() {
        let mut t = Transcript::new();
        let first = t.begin_reveal();
        let second = t.begin_reveal();

        t.finish_reveal(first);
        assert!(t.apply_reveal(second, "still active"));
    }

    #[test]
    fn non_bot_target_is_a_no_op() {
        let mut t = Transcript::new();
        let id = t.push_user("user text");
        // Forge a handle pointing at a User message; should never happen
        // under correct sequencing.
        t.active_reveal = Some(id);
        let handle = RevealHandle { message_id: id };

        assert!(!t.apply_reveal(handle, "clobbered"));
        assert_eq!(t.messages()[0].content, "user text");
    }
}
