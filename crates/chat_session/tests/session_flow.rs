//! End-to-end session flows with a controllable answering service

use std::sync::Mutex;

use answer_client::{AnsweringService, HealthStatus, QueryError, QueryRequest, QueryResponse};
use async_trait::async_trait;
use chat_core::Role;
use chat_session::{ChatSession, SubmitRejection};
use tokio::sync::oneshot;

/// Service whose single answer is released by the test.
struct GatedService {
    gate: Mutex<Option<oneshot::Receiver<Result<QueryResponse, QueryError>>>>,
    seen: Mutex<Vec<QueryRequest>>,
}

impl GatedService {
    fn new() -> (Self, oneshot::Sender<Result<QueryResponse, QueryError>>) {
        let (tx, rx) = oneshot::channel();
        let service = Self {
            gate: Mutex::new(Some(rx)),
            seen: Mutex::new(Vec::new()),
        };
        (service, tx)
    }
}

#[async_trait]
impl AnsweringService for GatedService {
    async fn query(&self, request: &QueryRequest) -> answer_client::Result<QueryResponse> {
        self.seen.lock().unwrap().push(request.clone());
        let rx = self.gate.lock().unwrap().take().expect("single request");
        rx.await.unwrap_or_else(|_| Err(QueryError::Decode("gate dropped".into())))
    }

    async fn health(&self) -> answer_client::Result<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }
}

fn response(answer: &str, sources: &[&str]) -> QueryResponse {
    QueryResponse {
        answer: answer.to_string(),
        sources: sources.iter().map(|s| s.to_string()).collect(),
        cache_hit: false,
    }
}

#[tokio::test]
async fn response_after_clear_produces_no_message() {
    let (service, release) = GatedService::new();
    let mut session = ChatSession::new();

    let pending = session.submit("What does clause 4 say?").unwrap();
    let request = pending.request();
    let call = tokio::spawn(async move { service.query(&request).await });

    session.clear();
    assert!(session.messages().is_empty());

    release.send(Ok(response("Clause 4 covers indemnity.", &["contract.pdf"]))).unwrap();
    let outcome = call.await.unwrap();

    assert!(!session.settle(pending, outcome));
    assert!(session.messages().is_empty());
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn only_one_request_outstanding() {
    let (service, release) = GatedService::new();
    let mut session = ChatSession::new();

    let pending = session.submit("first").unwrap();
    let before = session.messages().to_vec();

    assert_eq!(
        session.submit("second").unwrap_err(),
        SubmitRejection::AlreadySubmitting
    );
    assert_eq!(session.messages(), before.as_slice());

    let request = pending.request();
    release.send(Ok(response("one", &[]))).unwrap();
    let outcome = service.query(&request).await;
    assert!(session.settle(pending, outcome));

    let seen = service.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].question, "first");
    assert_eq!(seen[0].doc_type, None);
}

#[tokio::test]
async fn at_most_one_loading_message_across_turns() {
    let mut session = ChatSession::new();

    for (i, outcome) in [
        Ok(response("A", &["doc1"])),
        Err(QueryError::Server {
            status: 500,
            body: "Index unavailable".into(),
        }),
        Ok(response("C", &[])),
    ]
    .into_iter()
    .enumerate()
    {
        let pending = session.submit(&format!("question {i}")).unwrap();
        let loading = session.messages().iter().filter(|m| m.is_loading).count();
        assert_eq!(loading, 1);
        session.settle(pending, outcome);
        assert!(session.messages().iter().all(|m| !m.is_loading));
    }

    let roles: Vec<Role> = session.messages().iter().map(|m| m.role()).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );

    let answers: Vec<&str> = session
        .messages()
        .iter()
        .filter(|m| m.is_assistant())
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(answers, vec!["A", "Error: Index unavailable", "C"]);

    let typed: Vec<bool> = session
        .messages()
        .iter()
        .filter(|m| m.is_assistant())
        .map(|m| m.use_typing_effect)
        .collect();
    assert_eq!(typed, vec![true, false, true]);
}
