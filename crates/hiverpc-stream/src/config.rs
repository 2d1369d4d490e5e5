//! Streaming consumer configuration.

use std::time::Duration;

/// Delay settings for the streaming block consumer.
///
/// The consumer retries forever with a fixed delay: no exponential growth,
/// no retry cap.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Wait after a failed fetch, an undecodable response, or a block the
    /// node has not produced yet. The cursor does not advance.
    pub failure_wait: Duration,
    /// Wait between successful fetches, so a caught-up stream does not
    /// hammer the node at the chain tip.
    pub poll_wait: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            failure_wait: Duration::from_millis(2500),
            poll_wait: Duration::from_millis(1000),
        }
    }
}
