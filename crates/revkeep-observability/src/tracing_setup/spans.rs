//! Span definitions per pipeline stage.

/// Span covering one item's full retention run.
#[macro_export]
macro_rules! retention_span {
    ($item_id:expr) => {
        $crate::tracing::info_span!("revkeep.retention", item_id = %$item_id)
    };
}

/// Span covering one lineage's policy evaluation and aggregation.
#[macro_export]
macro_rules! lineage_span {
    ($item_id:expr, $lineage:expr) => {
        $crate::tracing::debug_span!("revkeep.lineage", item_id = %$item_id, lineage = %$lineage)
    };
}

/// Span covering one queue delivery.
#[macro_export]
macro_rules! delivery_span {
    ($item_id:expr, $attempt:expr) => {
        $crate::tracing::info_span!("revkeep.delivery", item_id = %$item_id, attempt = $attempt)
    };
}
