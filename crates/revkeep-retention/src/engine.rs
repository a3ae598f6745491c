//! RetentionEngine: one item, end to end.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use revkeep_core::config::RetentionConfig;
use revkeep_core::errors::RevkeepResult;
use revkeep_core::models::{
    EvaluationContext, PolicyFailure, PolicyVerdicts, RetentionSummary, RunOutcome,
};
use revkeep_core::traits::{IPolicyStore, IRetentionPolicy, IVersionStorage};
use revkeep_lineage::{LineageBuilder, LineageSet};
use revkeep_observability::{events, lineage_span, retention_span};
use revkeep_policy::{evaluate_isolated, PolicyRegistry};
use tracing::debug;

use crate::aggregator::aggregate;
use crate::executor::execute;
use crate::plan::RetentionPlan;

/// Decisions for an item computed without touching storage.
#[derive(Debug, Clone)]
pub struct PlannedRun {
    pub plan: RetentionPlan,
    /// Carries anomalies and policy failures; counts are filled on execution.
    pub summary: RetentionSummary,
}

/// Runs the retention pipeline for one content item.
///
/// Holds no per-item state; one engine can serve many threads.
pub struct RetentionEngine {
    storage: Arc<dyn IVersionStorage>,
    policies: Arc<dyn IPolicyStore>,
    registry: PolicyRegistry,
    lineages: LineageBuilder,
}

impl RetentionEngine {
    /// Engine with the built-in policy kinds and the default lineage.
    pub fn new(storage: Arc<dyn IVersionStorage>, policies: Arc<dyn IPolicyStore>) -> Self {
        Self {
            storage,
            policies,
            registry: PolicyRegistry::with_builtin(),
            lineages: LineageBuilder::default(),
        }
    }

    pub fn from_config(
        config: &RetentionConfig,
        storage: Arc<dyn IVersionStorage>,
        policies: Arc<dyn IPolicyStore>,
    ) -> Self {
        Self::new(storage, policies)
            .with_lineage_builder(LineageBuilder::new(config.default_lineage.clone()))
    }

    /// Replace the policy registry, e.g. to add custom kinds.
    pub fn with_registry(mut self, registry: PolicyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_lineage_builder(mut self, builder: LineageBuilder) -> Self {
        self.lineages = builder;
        self
    }

    /// Process `item_id` with the current time.
    pub fn process(&self, item_id: &str) -> RevkeepResult<RetentionSummary> {
        self.process_at(item_id, Utc::now())
    }

    /// Process `item_id` as of `now`.
    ///
    /// A missing item is a successful no-op. Every lineage is decided before
    /// the first delete is issued.
    pub fn process_at(&self, item_id: &str, now: DateTime<Utc>) -> RevkeepResult<RetentionSummary> {
        let span = retention_span!(item_id);
        let _guard = span.enter();

        let Some(PlannedRun { plan, mut summary }) = self.plan_at(item_id, now)? else {
            let summary = RetentionSummary::item_missing(item_id);
            events::run_completed(&summary);
            return Ok(summary);
        };

        let report = match execute(self.storage.as_ref(), &plan) {
            Ok(report) => report,
            Err(e) => {
                if e.is_fatal() {
                    events::invariant_violation(&summary, &e);
                }
                return Err(e);
            }
        };
        report.fold_into(&mut summary);

        events::run_completed(&summary);
        Ok(summary)
    }

    /// Compute the plan for `item_id` without deleting anything.
    /// `None` when the item no longer exists.
    pub fn plan_at(&self, item_id: &str, now: DateTime<Utc>) -> RevkeepResult<Option<PlannedRun>> {
        let Some(item) = self.storage.describe_item(item_id)? else {
            debug!(item_id, "item no longer exists");
            return Ok(None);
        };
        let versions = self.storage.list_versions(item_id)?;
        let configs = self.policies.list_enabled_policies(&item.item_type)?;

        let set = self.lineages.build(&item, versions);
        let built = self.registry.build_all(&configs);

        let mut summary = RetentionSummary::new(item_id, RunOutcome::Completed);
        for failure in built.failures {
            events::policy_failed(item_id, &failure);
            summary.policy_failures.push(failure);
        }

        let plan = self.decide(&set, &built.policies, &EvaluationContext::at(now), &mut summary);
        summary.anomalies = set.anomalies;

        Ok(Some(PlannedRun { plan, summary }))
    }

    fn decide(
        &self,
        set: &LineageSet,
        policies: &[Box<dyn IRetentionPolicy>],
        ctx: &EvaluationContext,
        summary: &mut RetentionSummary,
    ) -> RetentionPlan {
        let mut plan = RetentionPlan::new(set.item_id.clone());

        for lineage in set.iter() {
            let span = lineage_span!(set.item_id, lineage.tag);
            let _guard = span.enter();

            let mut verdicts: Vec<PolicyVerdicts> = Vec::with_capacity(policies.len());
            for policy in policies {
                match evaluate_isolated(policy.as_ref(), lineage, ctx) {
                    Ok(pv) => verdicts.push(pv),
                    Err(e) => {
                        let failure = PolicyFailure {
                            policy: policy.name().to_string(),
                            lineage: Some(lineage.tag.clone()),
                            reason: e.to_string(),
                        };
                        events::policy_failed(&set.item_id, &failure);
                        summary.policy_failures.push(failure);
                    }
                }
            }

            let decisions = aggregate(lineage, &verdicts);
            debug!(
                versions = lineage.len(),
                to_delete = decisions.to_delete().count(),
                "lineage decided"
            );
            plan.insert(decisions);
        }

        plan
    }
}
