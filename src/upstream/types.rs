//! Upstream Data Types
//!
//! Wire shapes for the upstream records API. Records are treated as opaque
//! beyond the fields the pipeline needs: a numeric index identifier and the
//! free-text address the filter matches on; everything else rides along in a
//! flattened remainder.

use serde::{Deserialize, Serialize};

/// One upstream item. Held only for the duration of a single work cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub address: String,

    /// Remaining upstream fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response envelope of a windowed page request.
///
/// `status` is the upstream result marker; anything other than `"ok"` means
/// the page (and therefore the whole fetch) failed. `total` is the size of
/// the global index space, read once per cycle for total-size discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub items: Vec<Record>,
}
