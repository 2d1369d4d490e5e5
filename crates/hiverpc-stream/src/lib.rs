//! # hiverpc-stream
//!
//! Block retrieval on top of any [`RpcTransport`]: head discovery, single
//! and range fetches with protocol-limit chunking, and a long-lived
//! streaming consumer that emits decoded blocks in strictly increasing
//! order, retrying through node faults without ever skipping a block.
//!
//! [`RpcTransport`]: hiverpc_core::transport::RpcTransport

pub mod config;
pub mod fetcher;
pub mod stream;

pub use config::StreamConfig;
pub use fetcher::{BlockFetcher, BLOCK_RANGE_LIMIT};
pub use stream::BlockStream;
