//! Built-in policies.

pub mod drafts_older_than;
pub mod keep_newest;
pub mod keep_published;
pub mod keep_younger_than;
pub mod label_hold;

pub use drafts_older_than::DraftsOlderThanPolicy;
pub use keep_newest::KeepNewestPolicy;
pub use keep_published::KeepPublishedPolicy;
pub use keep_younger_than::KeepYoungerThanPolicy;
pub use label_hold::LabelHoldPolicy;

use chrono::{DateTime, Duration, Utc};

/// Instant before which a version counts as older than `days`.
///
/// A window reaching past the representable range yields `MIN_UTC`, so no
/// version is old enough.
pub(crate) fn age_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_subtracts_whole_days() {
        let now = test_fixtures::base_time();
        assert_eq!(age_cutoff(now, 30), now - Duration::days(30));
    }

    #[test]
    fn cutoff_saturates_beyond_calendar_range() {
        let now = test_fixtures::base_time();
        assert_eq!(age_cutoff(now, u32::MAX), DateTime::<Utc>::MIN_UTC);
    }
}
