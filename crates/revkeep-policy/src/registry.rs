//! PolicyRegistry: maps a policy kind to the factory that builds it.

use std::collections::BTreeMap;

use revkeep_core::errors::PolicyError;
use revkeep_core::models::{PolicyConfig, PolicyFailure};
use revkeep_core::traits::IRetentionPolicy;
use tracing::debug;

use crate::policies::{
    DraftsOlderThanPolicy, KeepNewestPolicy, KeepPublishedPolicy, KeepYoungerThanPolicy,
    LabelHoldPolicy,
};

/// Builds a policy instance from its stored configuration.
pub type PolicyFactory =
    Box<dyn Fn(&PolicyConfig) -> Result<Box<dyn IRetentionPolicy>, PolicyError> + Send + Sync>;

/// Policies built for one run, plus the configs that could not be built.
pub struct BuiltPolicies {
    pub policies: Vec<Box<dyn IRetentionPolicy>>,
    pub failures: Vec<PolicyFailure>,
}

/// Registry of policy kinds.
pub struct PolicyRegistry {
    factories: BTreeMap<String, PolicyFactory>,
}

impl PolicyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry with every built-in kind registered.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(KeepNewestPolicy::KIND, |c| {
            Ok(Box::new(KeepNewestPolicy::from_config(c)?))
        });
        registry.register(KeepYoungerThanPolicy::KIND, |c| {
            Ok(Box::new(KeepYoungerThanPolicy::from_config(c)?))
        });
        registry.register(DraftsOlderThanPolicy::KIND, |c| {
            Ok(Box::new(DraftsOlderThanPolicy::from_config(c)?))
        });
        registry.register(LabelHoldPolicy::KIND, |c| {
            Ok(Box::new(LabelHoldPolicy::from_config(c)?))
        });
        registry.register(KeepPublishedPolicy::KIND, |c| {
            Ok(Box::new(KeepPublishedPolicy::from_config(c)?))
        });
        registry
    }

    /// Register (or replace) the factory for `kind`.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&PolicyConfig) -> Result<Box<dyn IRetentionPolicy>, PolicyError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build one policy.
    pub fn build(&self, config: &PolicyConfig) -> Result<Box<dyn IRetentionPolicy>, PolicyError> {
        let factory = self
            .factories
            .get(&config.kind)
            .ok_or_else(|| PolicyError::UnknownKind {
                name: config.name.clone(),
                kind: config.kind.clone(),
            })?;
        factory(config)
    }

    /// Build every enabled config. Disabled configs are skipped; configs that
    /// fail to build are reported instead of aborting the run.
    pub fn build_all(&self, configs: &[PolicyConfig]) -> BuiltPolicies {
        let mut policies = Vec::with_capacity(configs.len());
        let mut failures = Vec::new();

        for config in configs.iter().filter(|c| c.enabled) {
            match self.build(config) {
                Ok(policy) => {
                    debug!(policy = %config.name, kind = %config.kind, "policy built");
                    policies.push(policy);
                }
                Err(e) => failures.push(PolicyFailure {
                    policy: config.name.clone(),
                    lineage: None,
                    reason: e.to_string(),
                }),
            }
        }

        BuiltPolicies { policies, failures }
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revkeep_core::errors::RevkeepResult;
    use revkeep_core::models::{EvaluationContext, Lineage, VerdictMap};
    use serde_json::json;

    struct Never;

    impl IRetentionPolicy for Never {
        fn name(&self) -> &str {
            "never"
        }
        fn kind(&self) -> &str {
            "never"
        }
        fn evaluate(&self, _: &Lineage, _: &EvaluationContext) -> RevkeepResult<VerdictMap> {
            Ok(VerdictMap::new())
        }
    }

    #[test]
    fn builtin_kinds_registered() {
        let registry = PolicyRegistry::with_builtin();
        assert_eq!(
            registry.kinds(),
            vec![
                "drafts_older_than",
                "keep_newest",
                "keep_published",
                "keep_younger_than",
                "label_hold"
            ]
        );
    }

    #[test]
    fn unknown_kind_is_reported_not_fatal() {
        let registry = PolicyRegistry::with_builtin();
        let built = registry.build_all(&[
            PolicyConfig::new("keep-2", "keep_newest", json!({ "count": 2 })),
            PolicyConfig::new("mystery", "shred_everything", json!({})),
        ]);
        assert_eq!(built.policies.len(), 1);
        assert_eq!(built.failures.len(), 1);
        assert_eq!(built.failures[0].policy, "mystery");
        assert!(built.failures[0].lineage.is_none());
    }

    #[test]
    fn disabled_configs_skipped() {
        let registry = PolicyRegistry::with_builtin();
        let built = registry.build_all(&[
            PolicyConfig::new("keep-2", "keep_newest", json!({ "count": 2 })).disabled()
        ]);
        assert!(built.policies.is_empty());
        assert!(built.failures.is_empty());
    }

    #[test]
    fn custom_kind_can_be_registered() {
        let mut registry = PolicyRegistry::new();
        registry.register("never", |_| Ok(Box::new(Never)));
        let policy = registry
            .build(&PolicyConfig::new("n", "never", json!(null)))
            .unwrap();
        assert_eq!(policy.kind(), "never");
    }
}
