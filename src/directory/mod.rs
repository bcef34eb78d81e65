//! Peer Directory Module
//!
//! The coordination layer of the worker. Replicas never talk to each other;
//! they each query the orchestration API for the current member set, filter
//! it to their own role label, and sort it by a stable key derived from the
//! identifiers alone. Two replicas querying at the same instant therefore
//! converge on the same ordering, which is all the shared state the
//! partitioning protocol needs.
//!
//! ## Degraded Mode
//! Directory outages are absorbed here, never surfaced: a failed listing
//! collapses to a single-peer view (this replica at index 0), trading perfect
//! partitioning for availability. Overlapping fetches produced while the
//! directory is down are tolerated by the at-least-once publish contract.

pub mod service;
pub mod types;

pub use service::PeerDirectory;
pub use types::PeerView;
