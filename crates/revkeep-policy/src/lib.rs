//! # revkeep-policy
//!
//! Policies are independently configured units of judgment. Each one sees a
//! single lineage and returns `Allow`, `Keep`, or `Abstain` per version.
//! The registry turns stored `PolicyConfig`s into trait objects; the sandbox
//! keeps a failing policy from affecting any other.

pub mod policies;
pub mod registry;
pub mod sandbox;
pub mod settings;

pub use policies::{
    DraftsOlderThanPolicy, KeepNewestPolicy, KeepPublishedPolicy, KeepYoungerThanPolicy,
    LabelHoldPolicy,
};
pub use registry::{BuiltPolicies, PolicyFactory, PolicyRegistry};
pub use sandbox::evaluate_isolated;
