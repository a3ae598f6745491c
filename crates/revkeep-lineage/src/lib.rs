//! # revkeep-lineage
//!
//! Groups an item's versions by lineage tag, orders each lineage newest
//! first, and picks exactly one head per lineage. Never fails: inconsistent
//! host data degrades to a documented fallback and is reported as an anomaly.

pub mod builder;
pub mod head;

pub use builder::{LineageBuilder, LineageSet};
pub use head::resolve_head;
