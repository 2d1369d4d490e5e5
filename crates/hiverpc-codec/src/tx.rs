//! Transaction assembly: header, operations, extensions terminator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use hiverpc_core::error::FormatError;

use crate::keys::KeyCodec;
use crate::ops::Operation;
use crate::wire::put_uvarint;

/// The chain's textual expiration format, second granularity, UTC.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An unsigned transaction as the caller builds it.
///
/// The serializer never mutates it; extensions are reserved and always
/// encode as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: String,
    pub operations: Vec<Operation>,
}

/// Serializes transactions into the canonical signing payload.
///
/// Owns the key codec so operations that carry public keys can be encoded;
/// otherwise stateless and reentrant.
pub struct TxEncoder<K> {
    keys: K,
}

impl<K: KeyCodec> TxEncoder<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    /// Serialize the full transaction.
    ///
    /// Layout: ref block number (u16 LE), ref block prefix (u32 LE),
    /// expiration as Unix seconds (u32 LE), varint operation count, each
    /// operation in its original order, one zero byte for the empty
    /// extensions field. Operation order is part of the signed payload.
    ///
    /// Any failure aborts the whole serialization; no partial result.
    pub fn serialize(&self, tx: &Transaction) -> Result<Vec<u8>, FormatError> {
        let expiration = NaiveDateTime::parse_from_str(&tx.expiration, EXPIRATION_FORMAT)
            .map_err(|_| FormatError::Timestamp {
                input: tx.expiration.clone(),
            })?;

        let mut buf = Vec::new();
        buf.extend_from_slice(&tx.ref_block_num.to_le_bytes());
        buf.extend_from_slice(&tx.ref_block_prefix.to_le_bytes());
        buf.extend_from_slice(&(expiration.and_utc().timestamp() as u32).to_le_bytes());

        put_uvarint(&mut buf, tx.operations.len() as u64);
        for op in &tx.operations {
            buf.extend_from_slice(&self.encode_operation(op)?);
        }

        buf.push(0x00); // extensions, always empty
        Ok(buf)
    }

    /// Encode a single operation with this encoder's key codec.
    pub fn encode_operation(&self, op: &Operation) -> Result<Vec<u8>, FormatError> {
        op.encode(&self.keys)
    }
}
