use serde::{Deserialize, Serialize};

/// A contiguous, 1-based window of the global index space owned by one peer.
///
/// The canonical empty range is `start = 1, end = 0`; any range with
/// `end < start` is treated as empty and downstream fetching becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRange {
    pub start: u64,
    pub end: u64,
}

impl WorkRange {
    pub fn empty() -> Self {
        Self { start: 1, end: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of indices covered by this range.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }
}

/// Computes the slice of `[1, total]` owned by the peer at `self_index`.
///
/// `size = ceil(total / peer_count)`; peer `i` owns
/// `[i * size + 1, min((i + 1) * size, total)]`. Every peer except possibly
/// the last owns exactly `size` indices; the last absorbs the remainder of a
/// non-divisible split.
///
/// This is a pure function of its arguments. Two replicas (or two calls in
/// the same replica) holding the same peer snapshot always agree, which is
/// what makes coordination-free partitioning sound.
///
/// Degenerate inputs are normalized rather than rejected: a zero `peer_count`
/// is treated as one, and a `self_index` beyond the peer count (directory
/// race) is clamped to the last slot.
pub fn compute_range(total: u64, self_index: usize, peer_count: usize) -> WorkRange {
    if total == 0 {
        return WorkRange::empty();
    }

    let peer_count = peer_count.max(1) as u64;
    let self_index = (self_index as u64).min(peer_count - 1);

    let size = total.div_ceil(peer_count);
    let start = self_index * size + 1;
    let end = ((self_index + 1) * size).min(total);

    if start > end {
        // With more peers than indices, trailing peers get nothing.
        return WorkRange::empty();
    }

    WorkRange { start, end }
}
