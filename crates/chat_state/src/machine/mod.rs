//! State machine module
//!
//! Contains the FSM implementation for the submission lifecycle.

mod events;
mod states;
mod transitions;

pub use events::SubmissionEvent;
pub use states::SubmissionState;
pub use transitions::{StateMachine, StateTransition, TransitionError};
