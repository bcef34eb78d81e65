//! Work Cycle Module
//!
//! Sequences one full cycle — discover peers, compute the owned range, fetch
//! it, filter it, publish it — and owns error containment for the pipeline.
//!
//! ## State Machine
//! `Idle -> DiscoveringPeers -> ComputingRange -> Fetching -> Filtering ->
//! Publishing -> Idle`. Any stage failure maps to a contained failed-cycle
//! outcome; the orchestrator logs it with the worker identity and returns to
//! `Idle`, ready for the next trigger. A single cycle's failure never
//! terminates the process. At most one cycle runs at a time per process
//! (`run_once` takes `&mut self`).

pub mod error;
pub mod orchestrator;

pub use error::CycleError;
pub use orchestrator::{CycleOutcome, CycleReport, CycleState, WorkCycleOrchestrator};

#[cfg(test)]
mod tests;
