//! Failure isolation for policy evaluation.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use revkeep_core::errors::PolicyError;
use revkeep_core::models::{EvaluationContext, Lineage, PolicyVerdicts};
use revkeep_core::traits::IRetentionPolicy;

/// Evaluate `policy` on one lineage, converting a returned error or a panic
/// into a `PolicyError`. Callers treat an error as the policy abstaining on
/// the whole lineage.
pub fn evaluate_isolated(
    policy: &dyn IRetentionPolicy,
    lineage: &Lineage,
    ctx: &EvaluationContext,
) -> Result<PolicyVerdicts, PolicyError> {
    let outcome = catch_unwind(AssertUnwindSafe(|| policy.evaluate(lineage, ctx)));

    match outcome {
        Ok(Ok(verdicts)) => Ok(PolicyVerdicts::new(policy.name(), verdicts)),
        Ok(Err(e)) => Err(PolicyError::EvaluationFailed {
            name: policy.name().to_string(),
            lineage: lineage.tag.clone(),
            reason: e.to_string(),
        }),
        Err(payload) => Err(PolicyError::Panicked {
            name: policy.name().to_string(),
            lineage: lineage.tag.clone(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
