//! # hiverpc-http
//!
//! HTTP JSON-RPC transport for Hive-style nodes. Queries are numbered,
//! split into bounded chunks, and POSTed as JSON-RPC batch arrays with
//! bounded connection concurrency; results come back one per query, in
//! query order.

pub mod client;

pub use client::{HttpClient, HttpClientConfig, MIN_BATCH, MIN_CONNECTIONS};
