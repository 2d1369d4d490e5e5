//! Chain data types as returned by the node's JSON APIs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A block as returned by `block_api.get_block`.
///
/// `block_number` is not part of the wire payload — the node identifies the
/// block only by its id. The streaming consumer assigns the requested
/// sequence position before handing the block to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Block {
    #[serde(default)]
    pub block_number: u64,
    #[serde(default)]
    pub block_id: String,
    #[serde(default)]
    pub previous: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub witness: String,
    #[serde(default)]
    pub transaction_merkle_root: String,
    #[serde(default)]
    pub transactions: Vec<SignedTransaction>,
    #[serde(default)]
    pub extensions: Vec<Value>,
    #[serde(default)]
    pub signing_key: String,
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    #[serde(default)]
    pub witness_signature: String,
}

impl Block {
    /// Returns `true` if the node has not actually produced this block yet.
    /// `get_block` answers such requests with an empty body.
    pub fn is_empty(&self) -> bool {
        self.block_id.is_empty()
    }
}

/// A transaction embedded in a block, signatures included.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignedTransaction {
    #[serde(default)]
    pub ref_block_num: u16,
    #[serde(default)]
    pub ref_block_prefix: u32,
    #[serde(default)]
    pub expiration: String,
    #[serde(default)]
    pub operations: Vec<TxOperation>,
    #[serde(default)]
    pub extensions: Vec<Value>,
    #[serde(default)]
    pub signatures: Vec<String>,
}

/// An operation in its dynamic JSON form: a type name plus a free-form
/// value object. The typed, encodable counterpart lives in the codec crate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TxOperation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

/// Result of `condenser_api.get_dynamic_global_properties`, trimmed to the
/// field the streamer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u64,
}
