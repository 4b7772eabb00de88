use async_trait::async_trait;
use chat_core::Config;
use reqwest::{Client, Proxy, Response, Url};
use tracing::{debug, info, warn};

use crate::client_trait::AnsweringService;
use crate::error::{QueryError, Result};
use crate::models::{HealthStatus, QueryRequest, QueryResponse};

const QUERY_PATH: &str = "query";
const HEALTH_PATH: &str = "health";

/// HTTP client for the answering service.
///
/// No timeout or retry is applied: a request stays outstanding until the
/// service responds or the connection fails.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    client: Client,
    base_url: Url,
}

impl AnswerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Self::build_http_client(config)?;
        Self::with_client(client, &config.api_base)
    }

    /// Use an existing reqwest client against `api_base`.
    pub fn with_client(client: Client, api_base: &str) -> Result<Self> {
        // A trailing slash makes `join` append to the path instead of replacing its last segment.
        let normalized = format!("{}/", api_base.trim().trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| QueryError::InvalidUrl(format!("{api_base}: {e}")))?;
        Ok(Self { client, base_url })
    }

    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder();
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        Ok(builder.build()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| QueryError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Turn a non-success response into `QueryError::Server`, keeping its body text.
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read error body: {}", e);
                String::new()
            }
        };
        Err(QueryError::Server {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| QueryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AnsweringService for AnswerClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let url = self.endpoint(QUERY_PATH)?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(request).send().await?;
        let response = match Self::ensure_success(response).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Query failed: {}", e);
                return Err(e);
            }
        };

        let answer: QueryResponse = Self::decode(response).await?;
        info!(
            "Received answer ({} chars, {} sources, cache_hit={})",
            answer.answer.chars().count(),
            answer.sources.len(),
            answer.cache_hit
        );
        Ok(answer)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(HEALTH_PATH)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = AnswerClient::with_client(Client::new(), "http://localhost:5173/api").unwrap();
        assert_eq!(
            client.endpoint(QUERY_PATH).unwrap().as_str(),
            "http://localhost:5173/api/query"
        );
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = AnswerClient::with_client(Client::new(), "http://localhost:8000/").unwrap();
        assert_eq!(
            client.endpoint(HEALTH_PATH).unwrap().as_str(),
            "http://localhost:8000/health"
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        let err = AnswerClient::with_client(Client::new(), "not a url").unwrap_err();
        assert!(matches!(err, QueryError::InvalidUrl(_)));
    }

    #[test]
    fn test_new_from_default_config() {
        let client = AnswerClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
    }
}
