//! Block fetching: head discovery, single blocks, and chunked ranges.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;

use hiverpc_core::error::TransportError;
use hiverpc_core::request::{JsonRpcResponse, RpcQuery};
use hiverpc_core::transport::RpcTransport;
use hiverpc_core::types::DynamicGlobalProperties;

/// Blocks per `block_api.get_block_range` query. A server-side API limit,
/// not a tuning knob.
pub const BLOCK_RANGE_LIMIT: u64 = 500;

/// Fetches blocks through any [`RpcTransport`].
pub struct BlockFetcher<T> {
    transport: Arc<T>,
}

impl<T> Clone for BlockFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: RpcTransport> BlockFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Discover the node's current head block number.
    pub async fn head_block_number(&self) -> Result<u64, TransportError> {
        let props: DynamicGlobalProperties = self
            .transport
            .call(RpcQuery::bare("condenser_api.get_dynamic_global_properties"))
            .await?;
        Ok(props.head_block_number)
    }

    /// Fetch a single block's response envelope as raw bytes.
    pub async fn block_raw(&self, block_num: u64) -> Result<Bytes, TransportError> {
        let query = RpcQuery::new("block_api.get_block", json!({ "block_num": block_num }));
        let mut payloads = self.transport.execute_raw(vec![query]).await?;
        if payloads.len() != 1 {
            return Err(TransportError::BatchMismatch {
                sent: 1,
                got: payloads.len(),
            });
        }
        Ok(payloads.remove(0))
    }

    /// Fetch `count` blocks starting at `start` as parsed envelopes, one
    /// response per 500-block chunk, submitted as a single batch.
    pub async fn block_range(
        &self,
        start: u64,
        count: u64,
    ) -> Result<Vec<JsonRpcResponse>, TransportError> {
        self.transport.execute(range_queries(start, count)).await
    }

    /// Raw-bytes variant of [`block_range`](Self::block_range), for callers
    /// that decode each page themselves.
    pub async fn block_range_raw(&self, start: u64, count: u64) -> Result<Vec<Bytes>, TransportError> {
        self.transport.execute_raw(range_queries(start, count)).await
    }
}

/// Split an inclusive span of `count` blocks into one query per chunk.
/// Every chunk asks for a full `BLOCK_RANGE_LIMIT` blocks; the final chunk
/// may request past the span's end, which the server answers with fewer.
fn range_queries(start: u64, count: u64) -> Vec<RpcQuery> {
    let mut queries = Vec::new();
    let mut offset = start;
    while offset < start.saturating_add(count) {
        queries.push(RpcQuery::new(
            "block_api.get_block_range",
            json!({ "starting_block_num": offset, "count": BLOCK_RANGE_LIMIT }),
        ));
        offset += BLOCK_RANGE_LIMIT;
    }
    queries
}
