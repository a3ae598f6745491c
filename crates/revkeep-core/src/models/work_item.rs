use serde::{Deserialize, Serialize};

use super::RetentionSummary;

/// A queue delivery: one content item to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Opaque token identifying this delivery.
    pub claim_id: String,
    pub item_id: String,
    /// Deliveries so far, including this one.
    pub attempts: u32,
}

/// What the coordinator did with a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkOutcome {
    /// Processed and acknowledged.
    Acked { summary: RetentionSummary },
    /// Returned to the queue for redelivery.
    Released { item_id: String, error: String },
    /// Moved out of the queue; requires operator attention.
    Buried { item_id: String, reason: String },
    /// The queue rejected the ack, release or bury call. The claim stays
    /// outstanding and is redelivered once it times out. `summary` is set
    /// when the run itself succeeded.
    SettleFailed {
        item_id: String,
        error: String,
        summary: Option<RetentionSummary>,
    },
}

impl WorkOutcome {
    pub fn item_id(&self) -> &str {
        match self {
            Self::Acked { summary } => &summary.item_id,
            Self::Released { item_id, .. }
            | Self::Buried { item_id, .. }
            | Self::SettleFailed { item_id, .. } => item_id,
        }
    }
}
