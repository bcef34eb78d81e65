//! Cycle Error Taxonomy
//!
//! Every stage failure a cycle can surface, threaded as explicit results
//! rather than caught-and-logged control flow. Directory failures are absent
//! by design: the peer directory recovers internally and never raises
//! outward.

use thiserror::Error;

use crate::bus::PublishError;
use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum CycleError {
    /// Total-size discovery failed; no range can be computed this cycle.
    #[error("upstream count query failed: {0}")]
    Count(#[source] UpstreamError),

    /// Fetching the owned range failed part-way; the whole cycle aborts
    /// with no partial publish.
    #[error("upstream fetch failed: {0}")]
    Fetch(#[source] UpstreamError),

    /// The bus rejected the message. Not retried within the cycle; the next
    /// schedule re-attempts with a fresh range.
    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}
