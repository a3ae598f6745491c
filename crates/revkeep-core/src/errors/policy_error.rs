/// Policy construction and evaluation errors.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("unknown policy kind '{kind}' for policy '{name}'")]
    UnknownKind { name: String, kind: String },

    #[error("invalid settings for policy '{name}': {reason}")]
    InvalidSettings { name: String, reason: String },

    #[error("policy '{name}' failed on lineage '{lineage}': {reason}")]
    EvaluationFailed {
        name: String,
        lineage: String,
        reason: String,
    },

    #[error("policy '{name}' panicked on lineage '{lineage}': {message}")]
    Panicked {
        name: String,
        lineage: String,
        message: String,
    },
}
