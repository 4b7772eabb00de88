use async_trait::async_trait;

use crate::error::Result;
use crate::models::{HealthStatus, QueryRequest, QueryResponse};

/// A service that answers questions against an indexed document collection.
#[async_trait]
pub trait AnsweringService: Send + Sync {
    /// Ask one question; resolves once with the complete answer.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;

    /// Check that the service is up.
    async fn health(&self) -> Result<HealthStatus>;
}
