//! The streaming block consumer.
//!
//! A long-lived task that walks the chain one block at a time from the
//! current head. Progress is monotonic: the cursor advances only after a
//! block is decoded and handed to the caller, so a faulty node can delay
//! the stream but never make it skip or duplicate a block.

use std::pin::Pin;
use std::task::{Context, Poll};

use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::sleep;

use hiverpc_core::error::{DecodeError, TransportError};
use hiverpc_core::transport::RpcTransport;
use hiverpc_core::types::Block;

use crate::config::StreamConfig;
use crate::fetcher::BlockFetcher;

/// An unbounded, ordered sequence of blocks.
///
/// There is no close operation: dropping the stream stops the producer
/// task the next time it tries to hand a block over.
pub struct BlockStream {
    rx: mpsc::Receiver<Block>,
}

impl BlockStream {
    /// Receive the next block. `None` means the producer task has stopped.
    pub async fn recv(&mut self) -> Option<Block> {
        self.rx.recv().await
    }
}

impl futures::Stream for BlockStream {
    type Item = Block;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Block>> {
        self.rx.poll_recv(cx)
    }
}

impl<T: RpcTransport> BlockFetcher<T> {
    /// Start streaming blocks from the node's current head.
    ///
    /// Head discovery runs first and its failure is fatal: without a head
    /// there is no valid starting cursor, so the error is returned and no
    /// stream exists. Every later fault is retried forever with
    /// `config.failure_wait` between attempts.
    ///
    /// Each call starts a fresh run from the head at call time. The
    /// hand-off channel holds a single block: the producer waits until the
    /// caller has taken the previous block before fetching ahead.
    pub async fn stream(&self, config: StreamConfig) -> Result<BlockStream, TransportError> {
        let head = self.head_block_number().await?;
        tracing::info!(head, "starting block stream at chain head");

        let (tx, rx) = mpsc::channel(1);
        let fetcher = self.clone();
        tokio::spawn(async move {
            run(fetcher, head, tx, config).await;
        });

        Ok(BlockStream { rx })
    }
}

async fn run<T: RpcTransport>(
    fetcher: BlockFetcher<T>,
    start: u64,
    tx: mpsc::Sender<Block>,
    config: StreamConfig,
) {
    let mut cursor = start;
    loop {
        let raw = match fetcher.block_raw(cursor).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(block = cursor, error = %e, "block fetch failed, retrying");
                sleep(config.failure_wait).await;
                continue;
            }
        };

        let mut block = match decode_block(&raw) {
            Ok(Some(block)) => block,
            Ok(None) => {
                // The node has not produced this block yet.
                tracing::trace!(block = cursor, "waiting at chain tip");
                sleep(config.failure_wait).await;
                continue;
            }
            Err(e) => {
                tracing::warn!(block = cursor, error = %e, "block decode failed, retrying");
                sleep(config.failure_wait).await;
                continue;
            }
        };

        block.block_number = cursor;
        if tx.send(block).await.is_err() {
            tracing::debug!(block = cursor, "stream receiver dropped, stopping");
            return;
        }
        cursor += 1;

        sleep(config.poll_wait).await;
    }
}

#[derive(Deserialize)]
struct BlockEnvelope {
    #[serde(default)]
    result: Option<BlockResult>,
}

#[derive(Deserialize)]
struct BlockResult {
    #[serde(default)]
    block: Option<Block>,
}

/// Decode one `get_block` response envelope. `Ok(None)` means the node
/// answered but has no such block yet — an empty result object or a block
/// with an empty id.
fn decode_block(raw: &[u8]) -> Result<Option<Block>, DecodeError> {
    let envelope: BlockEnvelope = serde_json::from_slice(raw)?;
    Ok(envelope
        .result
        .and_then(|r| r.block)
        .filter(|block| !block.is_empty()))
}
