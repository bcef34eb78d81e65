//! Range Partitioning Module
//!
//! The arithmetic heart of the self-partitioning protocol. Given the total
//! workload size and this replica's position among its peers, `compute_range`
//! derives the contiguous slice this replica owns.
//!
//! ## Core Guarantee
//! For any total `T` and peer count `P`, the ranges computed for indices
//! `0..P` cover `[1, T]` exactly once: no gaps, no overlaps, and only the
//! last peer's range may be shorter than the others. Because the function is
//! pure, every replica that observed the same peer snapshot derives the same
//! split with no further communication.

pub mod range;

pub use range::{WorkRange, compute_range};
