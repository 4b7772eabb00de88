//! Submission states - The two states of a session's request lifecycle

use chat_core::MessageId;
use serde::{Deserialize, Serialize};

/// Defines the possible states of a session's submission lifecycle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// No request outstanding; a new question may be submitted.
    #[default]
    Idle,

    /// One request is outstanding for the given assistant placeholder.
    Submitting { placeholder: MessageId },
}

impl SubmissionState {
    /// Check if this state allows a new question.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// The placeholder awaiting a response, if any.
    pub fn in_flight(&self) -> Option<MessageId> {
        match self {
            Self::Idle => None,
            Self::Submitting { placeholder } => Some(*placeholder),
        }
    }

    /// Get a human-readable description of the current state.
    pub fn description(&self) -> &str {
        match self {
            Self::Idle => "Ready for input",
            Self::Submitting { .. } => "Searching documents",
        }
    }
}
