//! The scripted responder: keyword classification over the response catalog.

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::catalog::ResponseCatalog;
use folio_core::error::ResponderError;
use folio_core::responder::{Reply, Responder};

/// Answers from the fixed catalog. Only blank input is rejected.
pub struct ScriptedResponder {
    catalog: Arc<ResponseCatalog>,
}

impl ScriptedResponder {
    pub fn new(catalog: Arc<ResponseCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn respond(&self, input: &str) -> Result<Reply, ResponderError> {
        if input.trim().is_empty() {
            return Err(ResponderError::Validation);
        }
        let (topic, text) = self.catalog.respond(input);
        Ok(Reply {
            topic,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::TopicKey;

    #[tokio::test]
    async fn scripted_reply_follows_classifier() {
        let responder = ScriptedResponder::new(Arc::new(ResponseCatalog::default()));
        let reply = responder.respond("Can I download your CV?").await.unwrap();
        assert_eq!(reply.topic, TopicKey::Resume);
        assert!(reply.text.contains("Download Resume"));
        assert_eq!(responder.name(), "scripted");
    }

    #[tokio::test]
    async fn blank_input_is_validation_error() {
        let responder = ScriptedResponder::new(Arc::new(ResponseCatalog::default()));
        let err = responder.respond(" \t ").await.unwrap_err();
        assert_eq!(err, ResponderError::Validation);
    }
}
