//! Head resolution for one lineage.

use revkeep_core::models::{HeadResolution, VersionId, VersionMeta};

/// Pick the head of a lineage whose versions are sorted newest first.
///
/// The head is the single version flagged `is_current && is_latest_for_lineage`.
/// With zero or several flagged versions, the newest version wins.
/// Returns `None` only for an empty slice.
pub fn resolve_head(versions: &[VersionMeta]) -> Option<(VersionId, HeadResolution)> {
    let newest = versions.first()?;
    let mut flagged = versions.iter().filter(|v| v.is_flagged_head());

    match (flagged.next(), flagged.next()) {
        (Some(only), None) => Some((only.id, HeadResolution::Flagged)),
        (None, _) => Some((newest.id, HeadResolution::FallbackNoneFlagged)),
        (Some(_), Some(_)) => {
            let candidates = 2 + flagged.count();
            Some((
                newest.id,
                HeadResolution::FallbackMultipleFlagged { candidates },
            ))
        }
    }
}
