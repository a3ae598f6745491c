//! Collaborator contracts consumed by the engine.

pub mod policy_store;
pub mod retention_policy;
pub mod version_storage;
pub mod work_queue;

pub use policy_store::IPolicyStore;
pub use retention_policy::IRetentionPolicy;
pub use version_storage::IVersionStorage;
pub use work_queue::IWorkQueue;
