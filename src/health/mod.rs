//! Health Probe Module
//!
//! Liveness/readiness HTTP surface for the orchestrator's probes. Served on
//! a separate task so an in-flight work cycle never blocks a probe.

pub mod handlers;

pub use handlers::router;
