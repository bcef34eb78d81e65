//! Message Bus Module
//!
//! The publish side of the worker: one keyed message per completed work
//! cycle, carrying the filtered batch as a self-describing JSON `WorkResult`.
//!
//! ## Delivery Contract
//! At-least-once, best-effort. A transport failure is logged and ends the
//! cycle without retry; the next scheduled cycle re-attempts with a freshly
//! computed range, and idempotent consumers are assumed downstream. The
//! message key embeds the producer identity, the range bounds, and a unique
//! disambiguator so retried cycles from the same producer rarely collide.

pub mod producer;
pub mod types;

pub use producer::{KafkaBus, MessageBus, PublishError};
pub use types::WorkResult;
