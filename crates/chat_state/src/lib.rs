//! chat_state - Submission state machine for chat sessions
//!
//! A session is either idle, ready to accept a question, or submitting, with
//! exactly one request outstanding for a known assistant placeholder.

pub mod machine;

// Re-export commonly used types
pub use machine::{StateMachine, StateTransition, SubmissionEvent, SubmissionState, TransitionError};
