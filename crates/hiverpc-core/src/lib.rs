//! # hiverpc-core
//!
//! Shared types for the HiveRPC crates: JSON-RPC 2.0 wire envelopes, the
//! `RpcTransport` trait, chain data types, and the error taxonomy. The
//! transport implementations and the block streamer are built on top of the
//! interfaces defined here.

pub mod error;
pub mod request;
pub mod transport;
pub mod types;

pub use error::{DecodeError, FormatError, TransportError};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, RpcQuery};
pub use transport::RpcTransport;
pub use types::{Block, DynamicGlobalProperties, SignedTransaction, TxOperation};
