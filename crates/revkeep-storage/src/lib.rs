//! # revkeep-storage
//!
//! SQLite adapter over the host schema. One write connection behind a mutex
//! serves version listing and deletion, the policy table, and a durable
//! at-least-once work queue.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use store::SqliteStore;

use revkeep_core::errors::StorageError;

/// Wrap a SQLite failure message.
pub(crate) fn to_storage_err(message: impl Into<String>) -> StorageError {
    StorageError::SqliteError {
        message: message.into(),
    }
}
