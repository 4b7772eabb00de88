//! Query submission controller
//!
//! Owns the Idle/Submitting state machine of one session. A submission is
//! split in two steps so that an event loop can keep running (and clear the
//! session) while the backend call is outstanding:
//!
//! 1. [`QuerySubmissionController::submit`] validates, appends the user message
//!    and the loading placeholder, and hands back a [`PendingRequest`].
//! 2. [`QuerySubmissionController::settle`] consumes that request with the
//!    backend outcome, patches the placeholder and returns to Idle.

use answer_client::{AnsweringService, QueryRequest, QueryResponse, QueryError};
use chat_core::{Message, MessageId, MessagePatch, MessageStore, StoreError};
use chat_state::{StateMachine, SubmissionEvent, SubmissionState};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error_adapter::error_patch;

/// Why a submission was not accepted. Rejections have no side effects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("a question is already being answered")]
    AlreadySubmitting,

    #[error("store rejected message: {0}")]
    Store(#[from] StoreError),
}

/// One outstanding backend call: the trimmed question and the placeholder it
/// will patch. Settling consumes it.
#[derive(Debug)]
#[must_use = "a pending request must be settled to return the session to Idle"]
pub struct PendingRequest {
    question: String,
    placeholder: MessageId,
}

impl PendingRequest {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn placeholder(&self) -> MessageId {
        self.placeholder
    }

    /// Request payload for the answering service.
    pub fn request(&self) -> QueryRequest {
        QueryRequest::new(self.question.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuerySubmissionController {
    machine: StateMachine,
}

impl QuerySubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        self.machine.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.machine.state().is_submitting()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    /// Accept `question` if it is non-blank and nothing is outstanding.
    pub fn submit(
        &mut self,
        store: &mut MessageStore,
        question: &str,
    ) -> Result<PendingRequest, SubmitRejection> {
        let question = question.trim();
        if question.is_empty() {
            debug!("Ignoring empty question");
            return Err(SubmitRejection::EmptyQuestion);
        }
        if !self.machine.state().accepts_submission() {
            debug!("Ignoring question while {:?}", self.machine.state());
            return Err(SubmitRejection::AlreadySubmitting);
        }

        let user_id = MessageId::new();
        let placeholder = MessageId::new();
        store.append_all([
            Message::user(user_id, question),
            Message::assistant_placeholder(placeholder),
        ])?;
        self.machine
            .handle_event(SubmissionEvent::QuestionSubmitted { placeholder });

        info!("Submitting question for placeholder {}", placeholder);
        Ok(PendingRequest {
            question: question.to_string(),
            placeholder,
        })
    }

    /// Apply the backend outcome for `pending` and return to Idle.
    ///
    /// If the placeholder was discarded in the meantime (the session was
    /// cleared) the patch is dropped, but the controller still returns to
    /// Idle. Returns whether a message was patched.
    pub fn settle(
        &mut self,
        store: &mut MessageStore,
        pending: PendingRequest,
        outcome: Result<QueryResponse, QueryError>,
    ) -> bool {
        let placeholder = pending.placeholder;
        let (event, patch) = match outcome {
            Ok(response) => (
                SubmissionEvent::AnswerReceived { placeholder },
                MessagePatch::answer(response.answer, response.sources),
            ),
            Err(e) => {
                warn!("Request for placeholder {} failed: {}", placeholder, e);
                let detail = e.detail();
                (
                    SubmissionEvent::RequestFailed {
                        placeholder,
                        detail: detail.clone().unwrap_or_default(),
                    },
                    error_patch(detail.as_deref()),
                )
            }
        };

        if let Err(e) = self.machine.try_handle_event(event) {
            warn!("Ignoring settlement not issued by this controller: {}", e);
            return false;
        }

        let patched = store.patch(placeholder, patch);
        if !patched {
            info!("Session cleared before placeholder {} settled", placeholder);
        }
        patched
    }

    /// Submit `question`, wait for `service` and settle, in one step.
    ///
    /// Returns the placeholder id on acceptance.
    pub async fn ask(
        &mut self,
        store: &mut MessageStore,
        service: &dyn AnsweringService,
        question: &str,
    ) -> Result<MessageId, SubmitRejection> {
        let pending = self.submit(store, question)?;
        let placeholder = pending.placeholder();
        let outcome = service.query(&pending.request()).await;
        self.settle(store, pending, outcome);
        Ok(placeholder)
    }
}
