//! SQL for each table, as free functions over a `Connection`.

pub mod item_ops;
pub mod policy_ops;
pub mod queue_ops;
