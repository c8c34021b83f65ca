//! Assistant runtime state types.

use serde::{Deserialize, Serialize};

/// How overlapping submissions to one conversation are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Later submissions wait for earlier replies; replies keep submission order (default)
    #[default]
    Queue,
    /// Submissions made while composing are ignored
    RejectWhileComposing,
}

/// Runtime state of one conversation's assistant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantState {
    /// Whether a reply is pending
    pub composing: bool,

    /// Turns accepted but not yet answered
    pub pending_turns: usize,

    /// Turns answered since the conversation opened
    pub turns_completed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_defaults_to_queue() {
        assert_eq!(SubmitPolicy::default(), SubmitPolicy::Queue);
    }

    #[test]
    fn state_starts_idle() {
        let state = AssistantState::default();
        assert!(!state.composing);
        assert_eq!(state.turns_completed, 0);
    }
}
