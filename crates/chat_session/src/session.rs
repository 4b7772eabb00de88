//! ChatSession - A transcript plus the controller that feeds it

use answer_client::{AnsweringService, QueryError, QueryResponse};
use chat_core::{Message, MessageId, MessageStore};
use chat_state::SubmissionState;
use tracing::info;

use crate::controller::{PendingRequest, QuerySubmissionController, SubmitRejection};

/// One continuous conversation, reset wholesale by [`ChatSession::clear`].
#[derive(Debug, Default)]
pub struct ChatSession {
    store: MessageStore,
    controller: QuerySubmissionController,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        self.store.list()
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.store.get(id)
    }

    pub fn state(&self) -> &SubmissionState {
        self.controller.state()
    }

    /// Input should be disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    pub fn submit(&mut self, question: &str) -> Result<PendingRequest, SubmitRejection> {
        self.controller.submit(&mut self.store, question)
    }

    pub fn settle(
        &mut self,
        pending: PendingRequest,
        outcome: Result<QueryResponse, QueryError>,
    ) -> bool {
        self.controller.settle(&mut self.store, pending, outcome)
    }

    pub async fn ask(
        &mut self,
        service: &dyn AnsweringService,
        question: &str,
    ) -> Result<MessageId, SubmitRejection> {
        self.controller.ask(&mut self.store, service, question).await
    }

    /// Start a new chat. An outstanding request is not cancelled; its result
    /// is discarded when it settles.
    pub fn clear(&mut self) {
        info!("Clearing session ({} messages)", self.store.len());
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_keeps_outstanding_request_state() {
        let mut session = ChatSession::new();
        let pending = session.submit("q").unwrap();

        session.clear();
        assert!(session.messages().is_empty());
        assert!(session.is_submitting());
        assert_eq!(
            session.submit("another").unwrap_err(),
            SubmitRejection::AlreadySubmitting
        );

        session.settle(
            pending,
            Ok(QueryResponse {
                answer: "late".into(),
                sources: vec![],
                cache_hit: false,
            }),
        );
        assert!(session.messages().is_empty());
        assert!(!session.is_submitting());
    }
}
