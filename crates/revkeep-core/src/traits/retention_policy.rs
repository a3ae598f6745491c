use crate::errors::RevkeepResult;
use crate::models::{EvaluationContext, Lineage, VerdictMap};

/// A pure unit of retention judgment over one lineage.
///
/// Configuration is bound when the policy is built. Implementations must not
/// touch storage, should abstain on `lineage.head`, and may omit versions they
/// have no opinion on (missing means `Abstain`).
pub trait IRetentionPolicy: Send + Sync {
    /// Instance name, unique per item type.
    fn name(&self) -> &str;

    /// Registered kind this instance was built from.
    fn kind(&self) -> &str;

    fn evaluate(&self, lineage: &Lineage, ctx: &EvaluationContext) -> RevkeepResult<VerdictMap>;
}
