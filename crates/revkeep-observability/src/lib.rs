//! # revkeep-observability
//!
//! Subscriber setup and the structured events the retention pipeline emits:
//! lineage anomalies, policy failures, delete failures, per-item summaries,
//! and invariant violations.

pub mod events;
pub mod tracing_setup;

pub use tracing_setup::init;

#[doc(hidden)]
pub use tracing;
