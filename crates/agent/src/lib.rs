//! The assistant's turn loop.
//!
//! One turn follows a fixed sequence:
//!
//! 1. **Append** the visitor's message to the transcript
//! 2. **Compose**: raise the typing indicator and wait the configured delay
//! 3. **Respond**: classify the message and pick the catalog reply
//! 4. **Append** the reply and lower the indicator
//!
//! Overlapping submissions queue behind each other so replies keep the order
//! the questions were asked in.

pub mod responder;
pub mod turn;

pub use responder::ScriptedResponder;
pub use turn::{TurnController, TurnOutcome};
