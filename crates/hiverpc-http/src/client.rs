//! HTTP JSON-RPC client backed by `reqwest`.
//!
//! One call to [`HttpClient::execute`] (or `execute_raw`) is one logical
//! round trip: the queries are numbered, split into chunks of at most
//! `max_batch`, and each chunk is POSTed as a JSON-RPC batch array. Chunks
//! run concurrently up to `max_connections`, and results are returned one
//! per query in query order. A failure in any chunk fails the whole call —
//! there are no partial batch results.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use serde_json::value::RawValue;

use hiverpc_core::error::TransportError;
use hiverpc_core::request::{JsonRpcRequest, JsonRpcResponse, RpcQuery};
use hiverpc_core::transport::RpcTransport;

/// Floor for concurrent chunk connections.
pub const MIN_CONNECTIONS: usize = 10;
/// Floor for queries per batch chunk.
pub const MIN_BATCH: usize = 4;

/// Configuration for `HttpClient`.
///
/// Values below the protocol floors are raised once at construction; the
/// resulting configuration is immutable for the client's lifetime.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum chunk requests in flight at once.
    pub max_connections: usize,
    /// Maximum queries per batch chunk.
    pub max_batch: usize,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            max_connections: MIN_CONNECTIONS,
            max_batch: MIN_BATCH,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Batched HTTP JSON-RPC client.
pub struct HttpClient {
    endpoint: String,
    http: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new client for the given node endpoint.
    pub fn new(endpoint: impl Into<String>, mut config: HttpClientConfig) -> Self {
        config.max_connections = config.max_connections.max(MIN_CONNECTIONS);
        config.max_batch = config.max_batch.max(MIN_BATCH);

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            endpoint: endpoint.into(),
            http,
            config,
        }
    }

    /// Create with default configuration.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, HttpClientConfig::default())
    }

    /// The effective configuration after floor enforcement.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POST one chunk and return the raw response body.
    async fn post_chunk(&self, chunk: Vec<JsonRpcRequest>) -> Result<Bytes, TransportError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&chunk)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Http(format!("HTTP {status}: {body}")));
        }

        resp.bytes()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))
    }

    /// Number the queries and fan the chunks out with bounded concurrency.
    /// Each chunk's body comes back paired with its query count so callers
    /// can verify the response shape.
    async fn execute_chunks(
        &self,
        queries: Vec<RpcQuery>,
    ) -> Result<Vec<(usize, Bytes)>, TransportError> {
        let requests: Vec<JsonRpcRequest> = queries
            .into_iter()
            .enumerate()
            .map(|(id, query)| JsonRpcRequest::from_query(id as u64, query))
            .collect();

        let chunks: Vec<Vec<JsonRpcRequest>> = requests
            .chunks(self.config.max_batch)
            .map(|chunk| chunk.to_vec())
            .collect();

        tracing::debug!(
            endpoint = %self.endpoint,
            chunks = chunks.len(),
            "dispatching batch"
        );

        futures::stream::iter(chunks)
            .map(|chunk| async move {
                let sent = chunk.len();
                let body = self.post_chunk(chunk).await?;
                Ok::<_, TransportError>((sent, body))
            })
            .buffered(self.config.max_connections)
            .try_collect()
            .await
    }
}

#[async_trait]
impl RpcTransport for HttpClient {
    async fn execute(
        &self,
        queries: Vec<RpcQuery>,
    ) -> Result<Vec<JsonRpcResponse>, TransportError> {
        if queries.is_empty() {
            return Ok(vec![]);
        }

        let mut responses = Vec::new();
        for (sent, body) in self.execute_chunks(queries).await? {
            let chunk: Vec<JsonRpcResponse> = serde_json::from_slice(&body)?;
            if chunk.len() != sent {
                return Err(TransportError::BatchMismatch {
                    sent,
                    got: chunk.len(),
                });
            }
            responses.extend(chunk);
        }
        Ok(responses)
    }

    /// Raw mode: each query's response envelope is returned as uninterpreted
    /// bytes. The batch array is split with `RawValue`, so no structure is
    /// imposed on the payloads themselves.
    async fn execute_raw(&self, queries: Vec<RpcQuery>) -> Result<Vec<Bytes>, TransportError> {
        if queries.is_empty() {
            return Ok(vec![]);
        }

        let mut payloads = Vec::new();
        for (sent, body) in self.execute_chunks(queries).await? {
            let chunk: Vec<Box<RawValue>> = serde_json::from_slice(&body)?;
            if chunk.len() != sent {
                return Err(TransportError::BatchMismatch {
                    sent,
                    got: chunk.len(),
                });
            }
            payloads.extend(
                chunk
                    .into_iter()
                    .map(|raw| Bytes::copy_from_slice(raw.get().as_bytes())),
            );
        }
        Ok(payloads)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_are_enforced_at_construction() {
        let client = HttpClient::new(
            "https://api.hive.blog",
            HttpClientConfig {
                max_connections: 1,
                max_batch: 1,
                request_timeout: Duration::from_secs(5),
            },
        );
        assert_eq!(client.config().max_connections, MIN_CONNECTIONS);
        assert_eq!(client.config().max_batch, MIN_BATCH);
    }

    #[test]
    fn values_above_floors_are_kept() {
        let client = HttpClient::new(
            "https://api.hive.blog",
            HttpClientConfig {
                max_connections: 32,
                max_batch: 50,
                request_timeout: Duration::from_secs(5),
            },
        );
        assert_eq!(client.config().max_connections, 32);
        assert_eq!(client.config().max_batch, 50);
    }

    #[tokio::test]
    async fn empty_batch_short_circuits() {
        let client = HttpClient::for_endpoint("https://api.hive.blog");
        assert!(client.execute(vec![]).await.unwrap().is_empty());
        assert!(client.execute_raw(vec![]).await.unwrap().is_empty());
    }
}
