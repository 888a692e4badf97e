//! Conversation transcript

use serde::Serialize;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

/// Ordered, append-only conversation history
///
/// Grows monotonically during a session and is never reordered or truncated.
/// Owned by the orchestrator; the presentation layer only reads snapshots.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            sender: Sender::User,
            text: text.into(),
        });
    }

    /// Append an assistant message
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            sender: Sender::Assistant,
            text: text.into(),
        });
    }

    /// Messages in chronological order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Owned copy of the current history, safe to hand across the
    /// presentation boundary
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
