//! answer_client - Client for the document-retrieval answering service
//!
//! The service answers one question per request with a complete answer and
//! the labels of the documents it cited.

pub mod client;
pub mod client_trait;
pub mod error;
pub mod models;

pub use client::AnswerClient;
pub use client_trait::AnsweringService;
pub use error::{QueryError, Result};
pub use models::{HealthStatus, QueryRequest, QueryResponse};
