use super::{ConfigError, InvariantError, PolicyError, QueueError, StorageError};

/// Top-level error type. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RevkeepError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

pub type RevkeepResult<T> = Result<T, RevkeepError>;

impl RevkeepError {
    /// Stable machine-readable code for logs and dead-letter reasons.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::SqliteError { .. }) => "STORAGE_SQLITE",
            Self::Storage(StorageError::MigrationFailed { .. }) => "STORAGE_MIGRATION",
            Self::Storage(StorageError::ListFailed { .. }) => "STORAGE_LIST",
            Self::Storage(StorageError::DeleteFailed { .. }) => "STORAGE_DELETE",
            Self::Storage(StorageError::MalformedRow { .. }) => "STORAGE_MALFORMED_ROW",
            Self::Policy(PolicyError::UnknownKind { .. }) => "POLICY_UNKNOWN_KIND",
            Self::Policy(PolicyError::InvalidSettings { .. }) => "POLICY_INVALID_SETTINGS",
            Self::Policy(PolicyError::EvaluationFailed { .. }) => "POLICY_EVALUATION",
            Self::Policy(PolicyError::Panicked { .. }) => "POLICY_PANIC",
            Self::Config(_) => "CONFIG",
            Self::Invariant(InvariantError::HeadDeletion { .. }) => "INVARIANT_HEAD_DELETION",
            Self::Invariant(InvariantError::MissingHead { .. }) => "INVARIANT_MISSING_HEAD",
            Self::Queue(_) => "QUEUE",
        }
    }

    /// Fatal errors abort the item and must not be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_) | Self::Config(_))
    }

    /// Retryable errors are expected to clear on redelivery.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Queue(_))
    }
}
