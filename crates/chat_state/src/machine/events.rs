//! Submission events - Events that trigger state transitions

use chat_core::MessageId;
use serde::{Deserialize, Serialize};

/// Defines the events that can trigger state transitions in the FSM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmissionEvent {
    /// A question was accepted and its placeholder appended.
    QuestionSubmitted { placeholder: MessageId },

    /// The backend answered the request for `placeholder`.
    AnswerReceived { placeholder: MessageId },

    /// The request for `placeholder` failed.
    RequestFailed { placeholder: MessageId, detail: String },
}

impl SubmissionEvent {
    /// The placeholder this event refers to.
    pub fn placeholder(&self) -> MessageId {
        match self {
            Self::QuestionSubmitted { placeholder }
            | Self::AnswerReceived { placeholder }
            | Self::RequestFailed { placeholder, .. } => *placeholder,
        }
    }

    /// Check if this event settles an outstanding request.
    pub fn is_settlement(&self) -> bool {
        matches!(
            self,
            Self::AnswerReceived { .. } | Self::RequestFailed { .. }
        )
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::QuestionSubmitted { .. } => "question_submitted",
            Self::AnswerReceived { .. } => "answer_received",
            Self::RequestFailed { .. } => "request_failed",
        }
    }
}
