use crate::errors::RevkeepResult;
use crate::models::WorkItem;

/// Durable at-least-once queue of content item ids.
pub trait IWorkQueue: Send + Sync {
    fn enqueue(&self, item_id: &str) -> RevkeepResult<()>;

    /// Claim the next ready item, if any. The claim stays invisible to other
    /// consumers until acked, released, or buried.
    fn claim(&self) -> RevkeepResult<Option<WorkItem>>;

    /// Remove a processed item.
    fn ack(&self, item: &WorkItem) -> RevkeepResult<()>;

    /// Make the item claimable again.
    fn release(&self, item: &WorkItem) -> RevkeepResult<()>;

    /// Move the item out of circulation with a reason.
    fn bury(&self, item: &WorkItem, reason: &str) -> RevkeepResult<()>;

    /// Number of items waiting to be claimed.
    fn depth(&self) -> RevkeepResult<usize>;
}
