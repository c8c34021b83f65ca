//! Message and Conversation domain types.
//!
//! These are the value objects that flow through the widget:
//! User types a message → Turn controller appends it → Classifier picks a topic → Reply is appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation (one widget instance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a message, unique within its conversation.
///
/// Issued by [`Conversation`] from a monotonically increasing counter, so two
/// messages in the same conversation can never share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The site visitor
    User,
    /// The scripted assistant
    Assistant,
}

/// A single message in a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: MessageId,

    /// Who sent this message
    pub role: Role,

    /// The text content, stored verbatim
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

/// An ordered, append-only transcript.
///
/// Starts with a single seeded assistant greeting. Appending is the only way
/// to change it: there is no edit, delete or reorder.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,

    messages: Vec<Message>,

    #[serde(skip)]
    next_seq: u64,
}

impl Conversation {
    /// Create a conversation seeded with the assistant's opening greeting.
    pub fn new(seed_greeting: impl Into<String>) -> Self {
        Self::with_id(ConversationId::new(), seed_greeting)
    }

    /// Same as [`Conversation::new`] but with a caller-chosen id.
    pub fn with_id(id: ConversationId, seed_greeting: impl Into<String>) -> Self {
        let now = Utc::now();
        let mut conv = Self {
            id,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            next_seq: 1,
        };
        conv.append(Role::Assistant, seed_greeting);
        conv
    }

    /// Append a message and return a copy of it.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Message {
        let message = Message {
            id: MessageId(self.next_seq.to_string()),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        };
        self.next_seq += 1;
        self.updated_at = message.timestamp;
        self.messages.push(message.clone());
        message
    }

    /// Append a user message.
    pub fn append_user(&mut self, content: impl Into<String>) -> Message {
        self.append(Role::User, content)
    }

    /// Append an assistant message.
    pub fn append_assistant(&mut self, content: impl Into<String>) -> Message {
        self.append(Role::Assistant, content)
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a conversation holds at least its seed greeting.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_conversation_is_seeded() {
        let conv = Conversation::new("Hi there");
        assert_eq!(conv.len(), 1);
        let seed = &conv.messages()[0];
        assert_eq!(seed.role, Role::Assistant);
        assert_eq!(seed.content, "Hi there");
        assert_eq!(seed.id.0, "1");
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut conv = Conversation::new("seed");
        for i in 0..10 {
            if i % 2 == 0 {
                conv.append_user(format!("q{i}"));
            } else {
                conv.append_assistant(format!("a{i}"));
            }
        }
        assert_eq!(conv.len(), 11);
        let contents: Vec<_> = conv.messages()[1..].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["q0", "a1", "q2", "a3", "q4", "a5", "q6", "a7", "q8", "a9"]);
    }

    #[test]
    fn ids_never_collide() {
        let mut conv = Conversation::new("seed");
        for _ in 0..500 {
            conv.append_user("same text");
        }
        let ids: HashSet<_> = conv.messages().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), conv.len());
    }

    #[test]
    fn content_stored_verbatim() {
        let mut conv = Conversation::new("seed");
        let msg = conv.append_user("  padded input  ");
        assert_eq!(msg.content, "  padded input  ");
        assert_eq!(msg.role, Role::User);
        assert_eq!(conv.last(), Some(&msg));
    }

    #[test]
    fn conversation_tracks_updates() {
        let mut conv = Conversation::new("seed");
        let created = conv.created_at;
        conv.append_user("First message");
        assert!(conv.updated_at >= created);
        assert_eq!(conv.last().map(|m| m.role), Some(Role::User));
    }

    #[test]
    fn role_serializes_lowercase() {
        let conv = Conversation::new("seed");
        let json = serde_json::to_value(&conv).unwrap();
        assert_eq!(json["messages"][0]["role"], "assistant");
        assert_eq!(json["messages"][0]["id"], "1");
        assert!(json.get("next_seq").is_none());
    }
}
