//! Error types shared across the HiveRPC pipeline.

use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors that can occur during an RPC transport operation.
///
/// Transport errors are surfaced immediately to callers of one-shot calls;
/// the streaming block consumer retries them indefinitely instead.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// The batch response does not line up with the queries that were sent.
    #[error("batch response mismatch: sent {sent} queries, got {got} responses")]
    BatchMismatch { sent: usize, got: usize },

    /// Response envelope could not be deserialized.
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

/// Errors from interpreting a response payload that arrived intact.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("missing field '{field}' in response")]
    MissingField { field: String },

    #[error("unexpected response shape: {reason}")]
    UnexpectedShape { reason: String },

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors from encoding codec inputs into wire bytes.
///
/// Always fatal to the single encode call: no retry, no partial output.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Asset string did not split into exactly `<amount> <symbol>`.
    #[error("invalid asset format: {input:?}")]
    AssetFormat { input: String },

    /// Asset amount did not parse as a decimal number.
    #[error("invalid asset amount {amount:?}")]
    AmountParse { amount: String },

    /// Asset symbol does not fit the fixed 7-byte wire field.
    #[error("asset symbol too long: {symbol:?}")]
    SymbolTooLong { symbol: String },

    /// Expiration did not parse in the `%Y-%m-%dT%H:%M:%S` format.
    #[error("invalid expiration timestamp: {input:?}")]
    Timestamp { input: String },

    /// String arrays carry a single count byte on the wire.
    #[error("string array has {len} elements, wire limit is 255")]
    ArrayTooLong { len: usize },

    /// The external key codec rejected a public key string.
    #[error("invalid public key {key:?}: {reason}")]
    PublicKey { key: String, reason: String },

    /// Protocol invariant violation: the operation name has no position in
    /// the canonical operation table, so no opcode byte can be emitted.
    #[error("no wire opcode assigned for operation '{name}'")]
    UnassignedOpcode { name: String },
}
