use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub question: String,
    /// Metadata filter on document type. Always serialized, `null` when unset.
    pub doc_type: Option<String>,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            doc_type: None,
        }
    }
}

/// Successful body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    /// Whether the answer came from the service's cache. Not used for display.
    #[serde(default)]
    pub cache_hit: bool,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_null_doc_type() {
        let json = serde_json::to_value(QueryRequest::new("What is a tort?")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "question": "What is a tort?", "doc_type": null })
        );
    }

    #[test]
    fn test_response_tolerates_missing_cache_hit_and_extra_fields() {
        let body = r#"{"answer":"A","sources":["doc1"],"debug":{"retrieved_chunks":[]}}"#;
        let response: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.answer, "A");
        assert_eq!(response.sources, vec!["doc1".to_string()]);
        assert!(!response.cache_hit);
    }
}
