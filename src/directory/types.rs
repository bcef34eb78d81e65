//! Peer Directory Data Types
//!
//! Wire shapes for the orchestration API's member listing, and the resolved
//! `PeerView` the rest of the pipeline consumes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One member as reported by the orchestration API.
///
/// Only the identifier and the role labels are consumed; any further fields
/// in the listing are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,

    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// Response envelope of the member-list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<Member>,
}

/// A consistent snapshot of this workload's replicas.
///
/// `peers` is deterministically ordered, so `self_index` is the same value
/// every replica would compute for this worker from the same listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerView {
    pub peers: Vec<String>,
    pub self_index: usize,
}

impl PeerView {
    /// The degraded single-peer view used when the directory is unreachable.
    pub fn solo(worker_id: &str) -> Self {
        Self {
            peers: vec![worker_id.to_string()],
            self_index: 0,
        }
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len().max(1)
    }
}
