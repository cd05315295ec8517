//! Append-only chat transcript.
//!
//! DESIGN
//! ======
//! Entries are never edited or removed individually. The only way to drop
//! history is `clear()`, which the upload controller calls when a new
//! document starts a fresh conversation. The id counter is not reset by
//! `clear()`, so ids stay unique for the whole session.

#[cfg(test)]
#[path = "log_test.rs"]
mod log_test;

/// Opaque, monotonically increasing message identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// A single transcript entry. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    text: String,
    sender: Sender,
}

impl ChatMessage {
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Ordered transcript, oldest first.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
    next_id: u64,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry and return its id.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        self.next_id += 1;
        let id = MessageId(self.next_id);
        self.entries.push(ChatMessage { id, text: text.into(), sender });
        id
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn all(&self) -> &[ChatMessage] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
