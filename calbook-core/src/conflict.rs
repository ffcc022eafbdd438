//! Resource double-booking detection.

use chrono::{DateTime, Utc};

use crate::event::Occurrence;

/// Whether two half-open intervals overlap. Covers all three conflict
/// shapes: candidate starts inside, candidate ends inside, or candidate
/// fully contains the existing interval.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Find the first existing occurrence that holds `resource` and overlaps the
/// candidate interval.
pub fn find_conflict<'a>(
    existing: impl IntoIterator<Item = &'a Occurrence>,
    resource: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<&'a Occurrence> {
    existing.into_iter().find(|occ| {
        occ.resource.as_deref() == Some(resource)
            && intervals_overlap(occ.start, occ.end, start, end)
    })
}
