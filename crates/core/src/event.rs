//! Domain event system — how views observe a conversation.
//!
//! The turn controller publishes an event for every transcript change and
//! every composing toggle. The widget shell, CLI and SSE stream subscribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::classifier::TopicKey;
use crate::message::Message;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new widget conversation was opened
    ConversationStarted {
        conversation_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A message was appended to a transcript
    MessageAppended {
        conversation_id: String,
        message: Message,
    },

    /// The "composing" indicator turned on or off
    ComposingChanged {
        conversation_id: String,
        composing: bool,
        timestamp: DateTime<Utc>,
    },

    /// A turn finished with a reply
    TurnCompleted {
        conversation_id: String,
        topic: TopicKey,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Event name used on the SSE wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConversationStarted { .. } => "conversation_started",
            Self::MessageAppended { .. } => "message_appended",
            Self::ComposingChanged { .. } => "composing_changed",
            Self::TurnCompleted { .. } => "turn_completed",
        }
    }

    pub fn conversation_id(&self) -> &str {
        match self {
            Self::ConversationStarted { conversation_id, .. }
            | Self::MessageAppended { conversation_id, .. }
            | Self::ComposingChanged { conversation_id, .. }
            | Self::TurnCompleted { conversation_id, .. } => conversation_id,
        }
    }
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
