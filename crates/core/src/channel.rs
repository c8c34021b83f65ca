//! Channel trait — the abstraction over places a visitor can chat from.
//!
//! A Channel receives visitor messages and sends assistant replies back.
//! The terminal is one; the web widget talks through the gateway instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ChannelError;

/// Unique identifier for a channel instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message received from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// The channel this message belongs to
    pub channel_id: ChannelId,

    /// Sender identifier
    pub sender_id: String,

    /// The text content, as typed
    pub content: String,

    /// The chat/session identifier within the channel
    pub chat_id: String,
}

/// The core Channel trait.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name (e.g., "cli").
    fn name(&self) -> &str;

    /// Unique ID for this channel instance.
    fn id(&self) -> &ChannelId;

    /// Start listening for incoming messages.
    async fn start(
        &self,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<ChannelMessage, ChannelError>>,
        ChannelError,
    >;

    /// Send a reply to a specific chat.
    async fn send(&self, chat_id: &str, content: &str) -> std::result::Result<(), ChannelError>;

    /// Show or clear a typing indicator (if the surface supports it).
    async fn send_typing(&self, _chat_id: &str, _composing: bool) -> std::result::Result<(), ChannelError> {
        Ok(())
    }

    /// Check if a sender is allowed.
    fn is_allowed(&self, sender_id: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_message_creation() {
        let msg = ChannelMessage {
            channel_id: ChannelId("cli".into()),
            sender_id: "local_user".into(),
            content: "Hello bot!".into(),
            chat_id: "cli_session".into(),
        };
        assert_eq!(msg.channel_id.to_string(), "cli");
        assert_eq!(msg.content, "Hello bot!");
    }
}
