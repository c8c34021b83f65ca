//! Response catalog — the canned replies the assistant can give.
//!
//! Built once at startup and shared read-only (`Arc<ResponseCatalog>`) by
//! every conversation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::{TopicKey, classify};

const SEED_GREETING: &str =
    "Hi! 👋 I'm Idah's AI assistant. Ask me anything about his skills, experience, or projects!";

const GREETING_REPLY: &str = "Hello! 👋 I'm here to help you learn more about Idah Daniel. Feel free to ask about his skills, experience, projects, or how to get in touch!";

const DEFAULT_REPLIES: [(TopicKey, &str); 6] = [
    (
        TopicKey::Skills,
        "I'm proficient in React.js, TypeScript, Node.js, Express.js, MongoDB, PHP, MySQL, and JavaScript. I have 5+ years of professional experience with these technologies.",
    ),
    (
        TopicKey::Experience,
        "I have over 5 years of experience. I've worked at Aledoy Solutions as a Backend Developer, Setime Technologies as a Frontend Developer, and Cizar Consult as a Frontend Developer.",
    ),
    (
        TopicKey::Projects,
        "I've built various projects including e-commerce platforms, task management apps, AI chat interfaces, healthcare dashboards, and more. Check out the Projects section for details!",
    ),
    (
        TopicKey::Contact,
        "You can reach me via email at idahdaniel@example.com or through the contact form on this website. I'm always open to discussing new opportunities!",
    ),
    (
        TopicKey::Resume,
        "You can download my resume from the hero section or click the 'Download Resume' button. It contains detailed information about my skills and experience.",
    ),
    (
        TopicKey::Default,
        "I'm Idah Daniel's AI assistant. I can help you learn about his skills, experience, projects, and how to contact him. What would you like to know?",
    ),
];

/// Immutable mapping from topic to reply text.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseCatalog {
    seed_greeting: String,
    greeting: String,
    replies: BTreeMap<TopicKey, String>,
}

impl ResponseCatalog {
    /// Start a builder from the built-in replies.
    pub fn builder() -> ResponseCatalogBuilder {
        ResponseCatalogBuilder {
            catalog: Self::default(),
        }
    }

    /// The assistant message every new conversation starts with.
    pub fn seed_greeting(&self) -> &str {
        &self.seed_greeting
    }

    /// Reply text for a topic.
    ///
    /// `Greeting` resolves to the greeting literal rather than a catalog entry.
    pub fn reply(&self, topic: TopicKey) -> &str {
        if topic == TopicKey::Greeting {
            return &self.greeting;
        }
        self.replies
            .get(&topic)
            .or_else(|| self.replies.get(&TopicKey::Default))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Classify `input` and resolve the reply in one step.
    pub fn respond(&self, input: &str) -> (TopicKey, &str) {
        let topic = classify(input);
        tracing::debug!(topic = %topic, "Classified input");
        (topic, self.reply(topic))
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self {
            seed_greeting: SEED_GREETING.to_string(),
            greeting: GREETING_REPLY.to_string(),
            replies: DEFAULT_REPLIES
                .iter()
                .map(|(topic, text)| (*topic, text.to_string()))
                .collect(),
        }
    }
}

/// Applies startup overrides; once `build` is called the catalog is frozen.
#[derive(Debug)]
pub struct ResponseCatalogBuilder {
    catalog: ResponseCatalog,
}

impl ResponseCatalogBuilder {
    pub fn seed_greeting(mut self, text: impl Into<String>) -> Self {
        self.catalog.seed_greeting = text.into();
        self
    }

    pub fn greeting(mut self, text: impl Into<String>) -> Self {
        self.catalog.greeting = text.into();
        self
    }

    /// Replace the reply for one topic. A `Greeting` override sets the greeting literal.
    pub fn reply(mut self, topic: TopicKey, text: impl Into<String>) -> Self {
        if topic == TopicKey::Greeting {
            self.catalog.greeting = text.into();
        } else {
            self.catalog.replies.insert(topic, text.into());
        }
        self
    }

    pub fn build(self) -> ResponseCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_a_reply() {
        let catalog = ResponseCatalog::default();
        for topic in TopicKey::ALL {
            assert!(!catalog.reply(topic).is_empty(), "{topic}");
        }
    }

    #[test]
    fn greeting_is_a_literal_not_a_catalog_entry() {
        let catalog = ResponseCatalog::default();
        assert!(catalog.reply(TopicKey::Greeting).starts_with("Hello!"));
        assert_ne!(catalog.reply(TopicKey::Greeting), catalog.seed_greeting());
    }

    #[test]
    fn respond_classifies_and_resolves() {
        let catalog = ResponseCatalog::default();
        let (topic, reply) = catalog.respond("Tell me about your experience");
        assert_eq!(topic, TopicKey::Experience);
        assert!(reply.contains("Aledoy Solutions"));
    }

    #[test]
    fn builder_overrides() {
        let catalog = ResponseCatalog::builder()
            .seed_greeting("Welcome")
            .reply(TopicKey::Contact, "Write to me@example.org")
            .reply(TopicKey::Greeting, "Yo")
            .build();
        assert_eq!(catalog.seed_greeting(), "Welcome");
        assert_eq!(catalog.reply(TopicKey::Contact), "Write to me@example.org");
        assert_eq!(catalog.reply(TopicKey::Greeting), "Yo");
        assert!(catalog.reply(TopicKey::Skills).contains("TypeScript"));
    }
}
