//! Free-slot discovery within a booking horizon.
//!
//! [`find_available_slots`] partitions a horizon into contiguous
//! fixed-size slots and labels each one available or conflicting. Slot
//! testing reuses [`crate::conflict::check_conflicts`] verbatim, so a
//! slot is unavailable exactly when a conflict check with the same
//! buffer would report a collision for that slot's interval.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::check_conflicts;
use crate::event::ScheduledEvent;
use crate::interval::Interval;

/// A reference to an event blocking a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConflict {
    /// Identifier of the blocking event.
    pub event_id: String,
    /// Title of the blocking event, for display.
    pub title: String,
}

/// One fixed-duration sub-range of the horizon.
///
/// Computed, never persisted; a fresh list is produced on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Start of the slot (inclusive).
    pub start: DateTime<Utc>,
    /// End of the slot (exclusive).
    pub end: DateTime<Utc>,
    /// Whether the slot is free of (buffered) collisions.
    pub available: bool,
    /// The events blocking this slot, empty when available.
    pub conflicts: Vec<SlotConflict>,
}

impl Slot {
    /// Returns the slot's time range.
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Walks the horizon in fixed `slot_duration_minutes` increments and
/// labels each slot against the existing events.
///
/// A trailing remainder shorter than one slot is dropped, so the result
/// covers `[horizon_start, horizon_end)` only when the horizon length is
/// a multiple of the slot duration. Each slot is checked with the same
/// buffered predicate as the conflict detector; cancelled events never
/// block a slot.
///
/// A non-positive slot duration or an inverted/empty horizon yields an
/// empty list rather than an error.
pub fn find_available_slots(
    existing: &[ScheduledEvent],
    horizon_start: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
    slot_duration_minutes: i64,
    buffer_minutes: i64,
) -> Vec<Slot> {
    if slot_duration_minutes <= 0 || horizon_end <= horizon_start {
        debug!(
            %horizon_start,
            %horizon_end,
            slot_duration_minutes,
            "degenerate horizon or slot duration, producing no slots"
        );
        return Vec::new();
    }

    let slot_duration = Duration::minutes(slot_duration_minutes);
    let mut slots = Vec::new();
    let mut cursor = horizon_start;

    while cursor + slot_duration <= horizon_end {
        let interval = Interval::from_duration(cursor, slot_duration);
        let result = check_conflicts(&interval, existing, buffer_minutes);
        slots.push(Slot {
            start: interval.start,
            end: interval.end,
            available: !result.has_conflict,
            conflicts: result
                .conflicts
                .into_iter()
                .map(|c| SlotConflict {
                    event_id: c.event.id,
                    title: c.event.title,
                })
                .collect(),
        });
        cursor += slot_duration;
    }

    slots
}
