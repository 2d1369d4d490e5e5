//! The `RpcTransport` trait — one logical round trip for a batch of queries.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::request::{JsonRpcResponse, RpcQuery};

/// The central async trait every node transport must implement.
///
/// Both methods execute the queries as a single logical round trip and
/// return one result per query, in query order. There are no partial batch
/// results: if the round trip fails, the whole call fails.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Execute queries and return pre-parsed JSON-RPC envelopes.
    async fn execute(&self, queries: Vec<RpcQuery>)
        -> Result<Vec<JsonRpcResponse>, TransportError>;

    /// Execute queries and return each response as raw bytes, with no JSON
    /// structure imposed. For callers that decode differently per query.
    async fn execute_raw(&self, queries: Vec<RpcQuery>) -> Result<Vec<Bytes>, TransportError>;

    /// Return the transport's endpoint (URL or name).
    fn endpoint(&self) -> &str;

    /// Convenience: execute a single query and deserialize its result.
    async fn call<T: DeserializeOwned>(&self, query: RpcQuery) -> Result<T, TransportError> {
        let mut responses = self.execute(vec![query]).await?;
        if responses.len() != 1 {
            return Err(TransportError::BatchMismatch {
                sent: 1,
                got: responses.len(),
            });
        }
        let result = responses.remove(0).into_result().map_err(TransportError::Rpc)?;
        serde_json::from_value(result).map_err(TransportError::Deserialization)
    }
}
