//! # hiverpc-codec
//!
//! The binary transaction codec: everything needed to turn a caller-built
//! [`Transaction`] into the chain's canonical wire bytes, ready for signing
//! and broadcast.
//!
//! Layout rules, in short: all multi-byte integers little-endian, strings
//! UTF-8 with a varint length prefix, asset amounts scaled to `i64` by a
//! symbol-determined precision, and one opcode byte per operation fixed by
//! the protocol's canonical operation order.
//!
//! The codec is pure and reentrant — no I/O, no shared state, safe to call
//! concurrently from independent transactions.

pub mod asset;
pub mod keys;
pub mod ops;
pub mod tx;
pub mod wire;

pub use asset::Asset;
pub use keys::{KeyCodec, PublicKey};
pub use ops::{
    op_id, AccountUpdateOperation, Authority, ClaimRewardBalanceOperation, CustomJsonOperation,
    Operation, TransferOperation, VoteOperation, OPERATION_ORDER,
};
pub use tx::{Transaction, TxEncoder, EXPIRATION_FORMAT};

pub use hiverpc_core::error::FormatError;
