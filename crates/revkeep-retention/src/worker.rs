//! WorkCoordinator: drives the engine from an at-least-once queue.

use std::sync::Arc;

use rayon::prelude::*;
use revkeep_core::config::RetentionConfig;
use revkeep_core::errors::{ConfigError, RevkeepError, RevkeepResult};
use revkeep_core::models::{WorkItem, WorkOutcome};
use revkeep_core::traits::IWorkQueue;
use revkeep_observability::{delivery_span, events};
use tracing::info;

use crate::engine::RetentionEngine;

/// Claims items, runs the engine, and settles each delivery.
///
/// - success: ack (delete failures inside the summary are retried by the
///   next delivery of the item, not this one);
/// - fatal error: bury;
/// - retryable error: release, or bury once `max_attempts` is reached;
/// - anything else: bury.
///
/// A settle call the queue rejects becomes `WorkOutcome::SettleFailed`; the
/// claim times out and the item is redelivered.
pub struct WorkCoordinator {
    engine: Arc<RetentionEngine>,
    queue: Arc<dyn IWorkQueue>,
    max_attempts: u32,
    batch_size: usize,
    pool: rayon::ThreadPool,
}

impl WorkCoordinator {
    pub fn new(
        engine: Arc<RetentionEngine>,
        queue: Arc<dyn IWorkQueue>,
        config: &RetentionConfig,
    ) -> RevkeepResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.max(1))
            .thread_name(|i| format!("revkeep-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "retention.workers".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            engine,
            queue,
            max_attempts: config.max_attempts.max(1),
            batch_size: config.batch_size.max(1),
            pool,
        })
    }

    /// Claim and process one item. `None` when the queue is empty.
    pub fn run_once(&self) -> RevkeepResult<Option<WorkOutcome>> {
        Ok(self.queue.claim()?.map(|item| self.handle(&item)))
    }

    /// Process items one at a time until the queue is empty.
    pub fn drain(&self) -> RevkeepResult<Vec<WorkOutcome>> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.run_once()? {
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Claim up to `batch_size` items and process them in parallel.
    ///
    /// Only a failed claim aborts the batch; a failed settle call is reported
    /// as that item's outcome.
    pub fn run_batch(&self) -> RevkeepResult<Vec<WorkOutcome>> {
        let mut claimed = Vec::with_capacity(self.batch_size);
        while claimed.len() < self.batch_size {
            match self.queue.claim()? {
                Some(item) => claimed.push(item),
                None => break,
            }
        }
        if claimed.is_empty() {
            return Ok(Vec::new());
        }

        let outcomes: Vec<WorkOutcome> = self
            .pool
            .install(|| claimed.par_iter().map(|item| self.handle(item)).collect());

        let unsettled = outcomes
            .iter()
            .filter(|o| matches!(o, WorkOutcome::SettleFailed { .. }))
            .count();
        info!(claimed = claimed.len(), unsettled, "batch processed");
        Ok(outcomes)
    }

    /// Run batches until the queue is empty.
    pub fn drain_parallel(&self) -> RevkeepResult<Vec<WorkOutcome>> {
        let mut outcomes = Vec::new();
        loop {
            let batch = self.run_batch()?;
            if batch.is_empty() {
                return Ok(outcomes);
            }
            outcomes.extend(batch);
        }
    }

    /// Process one delivery and settle it on the queue.
    fn handle(&self, item: &WorkItem) -> WorkOutcome {
        let span = delivery_span!(item.item_id, item.attempts);
        let _guard = span.enter();

        let (outcome, settled) = match self.engine.process(&item.item_id) {
            Ok(summary) => {
                let settled = self.queue.ack(item);
                (WorkOutcome::Acked { summary }, settled)
            }
            Err(e) if e.is_retryable() && item.attempts < self.max_attempts => {
                events::item_released(&item.item_id, item.attempts, &e);
                let settled = self.queue.release(item);
                let outcome = WorkOutcome::Released {
                    item_id: item.item_id.clone(),
                    error: e.to_string(),
                };
                (outcome, settled)
            }
            Err(e) => {
                let reason = bury_reason(item, &e);
                events::item_buried(&item.item_id, item.attempts, &reason);
                let settled = self.queue.bury(item, &reason);
                let outcome = WorkOutcome::Buried {
                    item_id: item.item_id.clone(),
                    reason,
                };
                (outcome, settled)
            }
        };

        match settled {
            Ok(()) => outcome,
            Err(e) => {
                events::settle_failed(&item.item_id, item.attempts, &e);
                let summary = match outcome {
                    WorkOutcome::Acked { summary } => Some(summary),
                    _ => None,
                };
                WorkOutcome::SettleFailed {
                    item_id: item.item_id.clone(),
                    error: e.to_string(),
                    summary,
                }
            }
        }
    }
}

fn bury_reason(item: &WorkItem, err: &RevkeepError) -> String {
    if err.is_retryable() {
        format!(
            "{}: gave up after {} attempts: {err}",
            err.error_code(),
            item.attempts
        )
    } else {
        format!("{}: {err}", err.error_code())
    }
}
