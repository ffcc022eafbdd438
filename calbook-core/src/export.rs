//! Calendar export mapping.
//!
//! Maps stored occurrences into a neutral entry representation with start and
//! end broken into date/time components. Text encoding of the feed itself is
//! the job of the `ics` module (and ultimately the `icalendar` crate); this
//! module's responsibility ends at the structured list.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

use crate::event::Occurrence;
use crate::store::EventStore;

/// A start or end instant decomposed in UTC, the stored convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTime {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl From<DateTime<Utc>> for EntryTime {
    fn from(dt: DateTime<Utc>) -> Self {
        EntryTime {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }
}

/// One exportable calendar entry.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EntryTime,
    pub end: EntryTime,
}

impl CalendarEntry {
    pub fn from_occurrence(occ: &Occurrence) -> Self {
        CalendarEntry {
            title: occ.title.clone(),
            description: occ.description.clone(),
            location: occ.location.clone(),
            start: occ.start.into(),
            end: occ.end.into(),
        }
    }
}

/// Every occurrence visible to `user` (owned or invited), mapped for export.
pub fn entries_for_user(events: &EventStore, user: &str) -> Vec<CalendarEntry> {
    events
        .list_for_user(user)
        .iter()
        .map(CalendarEntry::from_occurrence)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ResourceStore;
    use chrono::TimeZone;

    #[test]
    fn test_entry_time_decomposition() {
        let t = EntryTime::from(Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 7).unwrap());
        assert_eq!(
            t,
            EntryTime {
                year: 2025,
                month: 12,
                day: 31,
                hour: 23,
                minute: 59,
            }
        );
    }

    #[test]
    fn test_entries_for_user_only_cover_visible_occurrences() {
        let events = EventStore::new();
        let resources = ResourceStore::new();

        let mine = Occurrence::new(
            "Mine",
            Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).unwrap(),
            "u1",
        );
        let theirs = Occurrence::new(
            "Theirs",
            Utc.with_ymd_and_hms(2025, 3, 21, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 21, 10, 0, 0).unwrap(),
            "u2",
        );
        events.create_batch(vec![mine, theirs], &resources).unwrap();

        let entries = entries_for_user(&events, "u1");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Mine");
        assert_eq!(entries[0].start.hour, 9);
        assert_eq!(entries[0].end.day, 20);
    }
}
