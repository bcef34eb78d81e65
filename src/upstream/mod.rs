//! Upstream Records Module
//!
//! Client for the paginated upstream data API. The API exposes a bounded
//! `[start, end]` window per request; this module splits a claimed work range
//! into consecutive maximum-width pages, issues them sequentially in index
//! order, and concatenates the results.
//!
//! ## Failure Semantics
//! Any page reporting a non-success marker fails the whole fetch with the
//! upstream-reported message, with no partial-success tolerance. There is no
//! automatic retry per page; a failed cycle is simply re-attempted on the
//! next schedule with a freshly computed range.
//
// TODO: bounded per-page retry with backoff once the upstream publishes its
// rate-limit headers.

pub mod client;
pub mod types;

pub use client::{MAX_PAGE_WIDTH, UpstreamClient, UpstreamError};
pub use types::Record;
