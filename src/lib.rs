//! Self-Partitioning Ingestion Worker Library
//!
//! This library crate defines the core modules of a horizontally-scaled
//! ingestion worker. It serves as the foundation for the binary executable
//! (`main.rs`).
//!
//! ## Architecture Modules
//! Every replica runs the same work cycle: discover peers, claim a slice of the
//! upstream index range, fetch it, filter it, publish it. The subsystems are:
//!
//! - **`directory`**: The coordination layer. Queries the orchestration API for
//!   the current member set and derives a deterministic peer ordering so every
//!   replica independently agrees on who owns which slice.
//! - **`partition`**: The range arithmetic. A pure function mapping (total,
//!   self index, peer count) to a contiguous, non-overlapping work range.
//! - **`upstream`**: The data intake client. Pulls the claimed range from the
//!   upstream records API in bounded-width pages.
//! - **`filter`**: The inclusion predicate applied to fetched records before
//!   publishing (address-substring match against configured district terms).
//! - **`bus`**: The Kafka publish path. One keyed message per completed cycle.
//! - **`cycle`**: The orchestrator sequencing the above and containing
//!   per-cycle failures so a bad cycle never takes the process down.
//! - **`health`**: Liveness/readiness probe handlers.

pub mod bus;
pub mod config;
pub mod cycle;
pub mod directory;
pub mod filter;
pub mod health;
pub mod partition;
pub mod upstream;
