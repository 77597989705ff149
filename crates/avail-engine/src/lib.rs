//! Scheduling engine: interval conflicts, availability slots, recurrence,
//! and aggregation.
//!
//! Every operation is a pure, synchronous computation over an event
//! collection the caller has already fetched. Fetching, permissions, and
//! notification delivery live in the surrounding application.

pub mod aggregate;
pub mod availability;
pub mod conflict;
pub mod event;
pub mod interval;
pub mod recurrence;
pub mod tracing;

pub use aggregate::{EventStats, filter_by_date_range, group_by_date, sort_by_time, stats};
pub use availability::{Slot, SlotConflict, find_available_slots};
pub use conflict::{Conflict, ConflictResult, check_conflict, check_conflicts};
pub use event::{
    Attendee, EventError, EventKind, EventStatus, ResponseStatus, ScheduledEvent,
};
pub use interval::Interval;
pub use recurrence::{Frequency, Occurrences, RecurrencePattern, next_occurrence, occurrences};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
