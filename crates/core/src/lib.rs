//! # Folio Core
//!
//! Domain types for the portfolio assistant: the append-only conversation,
//! the keyword classifier, the response catalog and the portfolio content.
//! This crate has **no framework dependencies** beyond serde and tokio's sync
//! primitives; the agent, channels and gateway crates build on it.

pub mod error;
pub mod message;
pub mod classifier;
pub mod catalog;
pub mod responder;
pub mod channel;
pub mod agent;
pub mod event;
pub mod portfolio;

// Re-export key types at crate root for ergonomics
pub use error::{ChannelError, ResponderError};
pub use message::{Message, MessageId, Role, Conversation, ConversationId};
pub use classifier::{TopicKey, classify};
pub use catalog::ResponseCatalog;
pub use responder::{Reply, Responder};
pub use channel::{Channel, ChannelMessage, ChannelId};
pub use agent::{AssistantState, SubmitPolicy};
pub use event::{DomainEvent, EventBus};
pub use portfolio::{Carousel, Profile, Project, ProjectCatalog, Skill, SkillAccent};
