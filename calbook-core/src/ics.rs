//! ICS feed generation.
//!
//! Serializes exported [`CalendarEntry`] values into a single VCALENDAR
//! document using the `icalendar` crate.

use icalendar::{Calendar, Component, EventLike};
use uuid::Uuid;

use crate::error::CalbookResult;
use crate::export::{CalendarEntry, EntryTime};

/// Format an entry time as an ICS UTC datetime value.
fn format_entry_time(t: &EntryTime) -> String {
    format!(
        "{:04}{:02}{:02}T{:02}{:02}00Z",
        t.year, t.month, t.day, t.hour, t.minute
    )
}

/// Generate a VCALENDAR document containing every entry.
pub fn generate_feed(entries: &[CalendarEntry]) -> CalbookResult<String> {
    let mut cal = Calendar::new();

    for entry in entries {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@calbook", Uuid::new_v4()));
        ics_event.summary(&entry.title);

        // DTSTAMP is required by RFC 5545.
        let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        ics_event.add_property("DTSTART", format_entry_time(&entry.start));
        ics_event.add_property("DTEND", format_entry_time(&entry.end));

        if let Some(ref desc) = entry.description {
            ics_event.description(desc);
        }
        if let Some(ref loc) = entry.location {
            ics_event.location(loc);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(rewrite_prodid(&cal.to_string()))
}

/// Replace the icalendar crate's PRODID with ours.
fn rewrite_prodid(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:CALBOOK\r\n");
        } else {
            result.push_str(line);
            result.push_str("\r\n");
        }
    }
    result
}
