//! Tests for the revkeep configuration system.

use std::collections::HashMap;

use revkeep_core::config::RevkeepConfig;
use revkeep_core::errors::ConfigError;
use revkeep_core::traits::IPolicyStore;

#[test]
fn defaults_are_valid() {
    let config = RevkeepConfig::default();
    config.validate().unwrap();
    assert_eq!(config.retention.default_lineage, "und");
    assert_eq!(config.retention.max_attempts, 5);
    assert!(config.policies.is_empty());
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    let config = RevkeepConfig::from_toml(
        r#"
[retention]
max_attempts = 9

[observability]
json_logs = true
"#,
    )
    .unwrap();
    assert_eq!(config.retention.max_attempts, 9);
    assert_eq!(config.retention.workers, 4);
    assert!(config.observability.json_logs);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn policies_table_feeds_policy_store() {
    let config = RevkeepConfig::from_toml(
        r#"
[[policies]]
name = "keep-3"
item_type = "article"
kind = "keep_newest"
settings = { count = 3 }

[[policies]]
name = "hold"
item_type = "*"
kind = "label_hold"
settings = { label = "editorial_hold" }

[[policies]]
name = "old-drafts"
item_type = "article"
kind = "drafts_older_than"
enabled = false
settings = { max_age_days = 30 }
"#,
    )
    .unwrap();

    let store = config.policy_store();
    let policies = store.list_enabled_policies("article").unwrap();
    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0].name, "keep-3");
    assert_eq!(policies[0].settings["count"], 3);
    assert_eq!(policies[1].settings["label"], "editorial_hold");
}

#[test]
fn duplicate_policy_names_rejected() {
    let err = RevkeepConfig::from_toml(
        r#"
[[policies]]
name = "dup"
item_type = "article"
kind = "keep_newest"

[[policies]]
name = "dup"
item_type = "article"
kind = "keep_published"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn zero_attempts_rejected() {
    let err = RevkeepConfig::from_toml("[retention]\nmax_attempts = 0\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "retention.max_attempts"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_toml_is_parse_error() {
    let err = RevkeepConfig::from_toml("[retention\nmax_attempts = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn env_overrides_take_priority_over_file() {
    let mut config = RevkeepConfig::from_toml("[retention]\nworkers = 2\n").unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        ("REVKEEP_WORKERS", "8"),
        ("REVKEEP_JSON_LOGS", "yes"),
        ("REVKEEP_MAX_ATTEMPTS", "not-a-number"),
        ("REVKEEP_DB_PATH", "/var/lib/revkeep/state.db"),
    ]);
    config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.retention.workers, 8);
    assert!(config.observability.json_logs);
    assert_eq!(config.retention.max_attempts, 5, "unparseable values are ignored");
    assert_eq!(
        config.storage.db_path,
        std::path::PathBuf::from("/var/lib/revkeep/state.db")
    );
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("revkeep.toml");
    std::fs::write(&path, "[storage]\nclaim_timeout_secs = 60\n").unwrap();

    let config = RevkeepConfig::from_file(&path).unwrap();
    assert_eq!(config.storage.claim_timeout_secs, 60);
}

#[test]
fn missing_file_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = RevkeepConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
