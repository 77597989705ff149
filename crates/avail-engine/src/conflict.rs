//! Conflict detection between a candidate interval and existing events.
//!
//! The overlap test is the strict half-open predicate from
//! [`Interval::overlaps`]: touching endpoints never conflict. An optional
//! symmetric buffer pads each existing event before testing, modeling a
//! required gap between bookings. Cancelled events and events with an
//! empty interval are ignored.

use serde::{Deserialize, Serialize};

use crate::event::ScheduledEvent;
use crate::interval::Interval;

/// One collision between the candidate and an existing event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The existing event the candidate collides with.
    pub event: ScheduledEvent,
    /// Unbuffered overlap between the two intervals, in whole minutes.
    pub overlap_minutes: i64,
}

/// The outcome of a conflict check. Ephemeral: built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    /// Whether at least one collision was found.
    pub has_conflict: bool,
    /// Every colliding event, in the input collection's order.
    pub conflicts: Vec<Conflict>,
}

impl ConflictResult {
    /// A result with no collisions.
    pub fn clear() -> Self {
        Self {
            has_conflict: false,
            conflicts: Vec::new(),
        }
    }
}

/// The bare overlap predicate: do two intervals share an instant?
///
/// No buffer, no overlap measurement. Touching endpoints and empty
/// intervals report `false`.
pub fn check_conflict(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

/// Checks a candidate interval against a collection of existing events.
///
/// Each existing event's interval is padded by `buffer_minutes` on both
/// ends before the overlap test. Every collision is reported (no early
/// exit), paired with the overlap of the *unpadded* intervals in whole
/// minutes so callers can show how much two bookings actually share.
///
/// Pure, and tolerant of malformed input: an empty candidate, cancelled
/// events, and events with empty intervals all simply never conflict.
pub fn check_conflicts(
    candidate: &Interval,
    existing: &[ScheduledEvent],
    buffer_minutes: i64,
) -> ConflictResult {
    if candidate.is_empty() {
        return ConflictResult::clear();
    }

    let conflicts: Vec<Conflict> = existing
        .iter()
        .filter(|event| event.occupies_calendar())
        .filter(|event| candidate.overlaps(&event.interval().padded(buffer_minutes)))
        .map(|event| Conflict {
            event: event.clone(),
            overlap_minutes: candidate.overlap_minutes(&event.interval()),
        })
        .collect();

    ConflictResult {
        has_conflict: !conflicts.is_empty(),
        conflicts,
    }
}
