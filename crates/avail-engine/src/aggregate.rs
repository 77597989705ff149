//! Deterministic grouping, filtering, and summary statistics.
//!
//! Thin consumers of the interval primitives used by dashboards and list
//! views. Everything here is a pure function over a caller-supplied
//! collection; `now` and the display timezone are parameters, never read
//! from the environment.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{EventKind, EventStatus, ScheduledEvent};
use crate::interval::Interval;

/// Summary counts over an event collection.
///
/// An audit view: `total_duration_minutes` sums every event, cancelled
/// ones included, while `upcoming` excludes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    /// Number of events in the collection.
    pub total: usize,
    /// Events that have not ended and are not cancelled.
    pub upcoming: usize,
    /// Events whose end lies before `now`.
    pub past: usize,
    /// Events starting on `now`'s calendar date in the given timezone.
    pub today: usize,
    /// Cancelled events.
    pub cancelled: usize,
    /// Counts per event kind.
    pub by_kind: BTreeMap<EventKind, usize>,
    /// Counts per lifecycle status.
    pub by_status: BTreeMap<EventStatus, usize>,
    /// Total scheduled minutes across all events, cancelled included.
    pub total_duration_minutes: i64,
}

/// Groups events by the calendar date of their start instant in the
/// caller's timezone. Within a date, input order is preserved.
pub fn group_by_date<Tz: TimeZone>(
    events: &[ScheduledEvent],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<ScheduledEvent>> {
    let mut groups: BTreeMap<NaiveDate, Vec<ScheduledEvent>> = BTreeMap::new();
    for event in events {
        let date = event.start.with_timezone(tz).date_naive();
        groups.entry(date).or_default().push(event.clone());
    }
    groups
}

/// Returns the events whose interval intersects `[range_start,
/// range_end)`, using the same half-open overlap predicate as conflict
/// detection, with no buffer. All statuses are included.
pub fn filter_by_date_range(
    events: &[ScheduledEvent],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Vec<ScheduledEvent> {
    let range = Interval::new(range_start, range_end);
    events
        .iter()
        .filter(|event| event.interval().overlaps(&range))
        .cloned()
        .collect()
}

/// Computes summary statistics over a collection.
pub fn stats<Tz: TimeZone>(
    events: &[ScheduledEvent],
    now: DateTime<Utc>,
    tz: &Tz,
) -> EventStats {
    let today = now.with_timezone(tz).date_naive();
    let mut out = EventStats {
        total: events.len(),
        ..EventStats::default()
    };

    for event in events {
        let past = event.end < now;
        if past {
            out.past += 1;
        }
        if event.status == EventStatus::Cancelled {
            out.cancelled += 1;
        } else if !past {
            out.upcoming += 1;
        }
        if event.start.with_timezone(tz).date_naive() == today {
            out.today += 1;
        }
        *out.by_kind.entry(event.kind).or_insert(0) += 1;
        *out.by_status.entry(event.status).or_insert(0) += 1;
        out.total_duration_minutes += event.duration_minutes();
    }

    out
}

/// Sorts events ascending by start time. The sort is stable, so events
/// with equal starts keep their input order.
pub fn sort_by_time(events: &mut [ScheduledEvent]) {
    events.sort_by_key(|event| event.start);
}
