/// Work queue errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue backend error: {message}")]
    Backend { message: String },

    #[error("claim {claim_id} is unknown or has expired")]
    UnknownClaim { claim_id: String },
}
