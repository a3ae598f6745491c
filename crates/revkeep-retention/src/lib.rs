//! # revkeep-retention
//!
//! The decision and execution half of the pipeline:
//!
//! - [`aggregator`] merges per-policy verdicts into one decision per version
//!   (veto wins, deletion needs at least one supporter, the head is never
//!   deleted).
//! - [`executor`] re-checks the head invariant over a whole [`RetentionPlan`]
//!   and then issues the deletes.
//! - [`engine`] runs one item end to end: lineages, policies, plan, execute.
//! - [`worker`] drives the engine from an at-least-once work queue.

pub mod aggregator;
pub mod engine;
pub mod executor;
pub mod plan;
pub mod worker;

pub use aggregator::{aggregate, LineageDecisions};
pub use engine::{PlannedRun, RetentionEngine};
pub use executor::{execute, verify_plan, ExecutionReport};
pub use plan::RetentionPlan;
pub use worker::WorkCoordinator;
