//! Bus Payload Types

use serde::{Deserialize, Serialize};

use crate::partition::WorkRange;
use crate::upstream::Record;

/// The outcome of one completed work cycle, published as a single message.
///
/// Created after filtering, consumed once by the publisher, then discarded.
/// The producer id and range bounds make the payload self-describing, so
/// downstream consumers can dedup or audit without extra context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkResult {
    pub producer_id: String,
    pub range: WorkRange,
    pub records: Vec<Record>,
}

impl WorkResult {
    /// Derives the message key for this result.
    ///
    /// `{producer_id}:{start}-{end}:{disambiguator}` — the disambiguator is
    /// unique per call, so two cycles publishing the same range from the
    /// same producer still get distinct keys.
    pub fn message_key(&self) -> String {
        format!(
            "{}:{}-{}:{}",
            self.producer_id,
            self.range.start,
            self.range.end,
            uuid::Uuid::new_v4()
        )
    }
}
