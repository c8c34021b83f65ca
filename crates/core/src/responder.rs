//! Responder trait — the abstraction over reply sources.
//!
//! A Responder turns one visitor message into one assistant reply. The
//! shipped implementation is the scripted keyword responder; anything
//! network-backed would plug in here and report failures as
//! [`ResponderError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classifier::TopicKey;
use crate::error::ResponderError;

/// A reply chosen for a visitor message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub topic: TopicKey,
    pub text: String,
}

#[async_trait]
pub trait Responder: Send + Sync {
    /// A human-readable name (e.g., "scripted").
    fn name(&self) -> &str;

    /// Produce the reply for `input`.
    async fn respond(&self, input: &str) -> std::result::Result<Reply, ResponderError>;
}
