//! Error types for the Folio domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Configuration and HTTP errors live with their crates (`ConfigError`,
//! `GatewayError`); these cover the chat surfaces and reply sources.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Message delivery failed to {channel}: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    #[error("Channel connection lost: {0}")]
    ConnectionLost(String),
}

/// Failures of a reply source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponderError {
    #[error("Empty input rejected")]
    Validation,

    #[error("Reply generation failed: {0}")]
    Service(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_error_displays_correctly() {
        let err = ChannelError::DeliveryFailed {
            channel: "cli".into(),
            reason: "stdout closed".into(),
        };
        assert!(err.to_string().contains("cli"));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn responder_error_displays_correctly() {
        assert_eq!(ResponderError::Validation.to_string(), "Empty input rejected");
        assert!(ResponderError::Service("timeout".into()).to_string().contains("timeout"));
    }
}
