//! Recurrence rule expansion.
//!
//! Expands a base interval plus a [`RepeatRule`] into a finite, ordered list
//! of concrete candidate intervals, all of the base interval's duration. The
//! expansion is a pure function of its inputs and is always materialized in
//! full before anything is persisted.

use chrono::{DateTime, Datelike, Duration, Months, Utc};

use crate::error::{CalbookError, CalbookResult};
use crate::event::{Frequency, RepeatRule};

/// Occurrences emitted when a repeating rule carries neither `count` nor
/// `until`.
pub const DEFAULT_COUNT: u32 = 10;

/// Upper bound on cursor advances for `custom` rules (four years of daily
/// candidates). A day filter that never matches ends expansion here instead
/// of looping forever.
const CUSTOM_SCAN_CAP: u32 = 1464;

/// Expand `start..end` according to `rule`.
///
/// Termination: after `count` emitted occurrences, or once a candidate start
/// exceeds `until`, whichever comes first. A repeating rule with neither
/// bound emits [`DEFAULT_COUNT`] occurrences. A `count` of zero is treated
/// as unset, matching the permissive handling of the original wire format.
pub fn expand(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rule: &RepeatRule,
) -> CalbookResult<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    if start >= end {
        return Err(CalbookError::Validation(
            "event must start before it ends".into(),
        ));
    }

    if rule.frequency == Frequency::None {
        return Ok(vec![(start, end)]);
    }

    let duration = end - start;
    let count = effective_count(rule);
    let mut out = Vec::new();

    match rule.frequency {
        Frequency::None => unreachable!("handled above"),
        Frequency::Daily => {
            collect_stepped(&mut out, rule, count, duration, |k| {
                Some(start + Duration::days(i64::from(k)))
            });
        }
        Frequency::Weekly => {
            collect_stepped(&mut out, rule, count, duration, |k| {
                Some(start + Duration::days(7 * i64::from(k)))
            });
        }
        Frequency::Monthly => {
            // Month arithmetic clamps to the target month's last day when it
            // lacks the base day-of-month (Jan 31 -> Feb 28/29). Offsets are
            // always taken from the base start, so months that do have the
            // day revert to it (Mar 31 after Feb 28).
            collect_stepped(&mut out, rule, count, duration, |k| {
                start.checked_add_months(Months::new(k))
            });
        }
        Frequency::Custom => {
            for step in 0..CUSTOM_SCAN_CAP {
                let candidate = start + Duration::days(i64::from(step));
                if past_until(candidate, rule) {
                    break;
                }
                if matches_day_filter(candidate, rule) {
                    out.push((candidate, candidate + duration));
                    if count.is_some_and(|c| out.len() as u32 >= c) {
                        break;
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Emit candidates from a monotone step function until a bound is hit.
fn collect_stepped(
    out: &mut Vec<(DateTime<Utc>, DateTime<Utc>)>,
    rule: &RepeatRule,
    count: Option<u32>,
    duration: Duration,
    step: impl Fn(u32) -> Option<DateTime<Utc>>,
) {
    let mut k = 0;
    loop {
        let Some(candidate) = step(k) else {
            break;
        };
        if past_until(candidate, rule) {
            break;
        }
        out.push((candidate, candidate + duration));
        if count.is_some_and(|c| out.len() as u32 >= c) {
            break;
        }
        k += 1;
    }
}

fn effective_count(rule: &RepeatRule) -> Option<u32> {
    let explicit = rule.count.filter(|c| *c > 0);
    if rule.until.is_some() {
        explicit
    } else {
        Some(explicit.unwrap_or(DEFAULT_COUNT))
    }
}

fn past_until(candidate: DateTime<Utc>, rule: &RepeatRule) -> bool {
    rule.until.is_some_and(|until| candidate > until)
}

/// `custom` day filter: weekday must be listed (when the list is non-empty)
/// and the day-of-month must match (when set).
fn matches_day_filter(candidate: DateTime<Utc>, rule: &RepeatRule) -> bool {
    let weekday_ok = rule.days_of_week.is_empty()
        || rule
            .days_of_week
            .contains(&candidate.weekday().num_days_from_sunday());
    let day_ok = rule.day_of_month.is_none_or(|d| candidate.day() == d);
    weekday_ok && day_ok
}
