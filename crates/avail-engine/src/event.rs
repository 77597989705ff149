//! Event types for the scheduling engine.
//!
//! [`ScheduledEvent`] is the concrete record the engine operates over:
//! an interval plus status, kind, attendees, and an optional recurrence
//! rule. Status and kind are closed enums so every decision point in the
//! engine matches exhaustively instead of comparing strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::Interval;
use crate::recurrence::RecurrencePattern;

/// Lifecycle status of a scheduled event.
///
/// Only [`EventStatus::Cancelled`] removes an event from conflict and
/// availability computation; every status participates in aggregation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl EventStatus {
    /// Returns a human-readable label for this status.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
            Self::NoShow => "No-show",
        }
    }
}

/// The kind of scheduled event, as grouped by dashboards and list views.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Meeting,
    Call,
    Visit,
    Deadline,
    Reminder,
    Other,
}

impl EventKind {
    /// Returns a human-readable label for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Meeting => "Meeting",
            Self::Call => "Call",
            Self::Visit => "Visit",
            Self::Deadline => "Deadline",
            Self::Reminder => "Reminder",
            Self::Other => "Other",
        }
    }
}

/// An attendee's response to an event invitation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Tentative,
}

/// A participant attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Identifier of the participant, resolved by the identity layer.
    pub participant_id: String,
    /// The participant's invitation response.
    pub response: ResponseStatus,
}

impl Attendee {
    /// Creates an attendee with a pending response.
    pub fn new(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            response: ResponseStatus::Pending,
        }
    }

    /// Builder method to set the response status.
    #[must_use]
    pub fn with_response(mut self, response: ResponseStatus) -> Self {
        self.response = response;
        self
    }
}

/// Validation failures for an event record.
///
/// The engine itself tolerates malformed records by degrading to empty
/// results; this error type exists for the form/input layer that rejects
/// them before they are persisted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// The event's end does not come after its start.
    #[error("event interval is empty: start must be strictly before end")]
    EmptyInterval,
    /// A recurrence rule with a step of zero can never advance.
    #[error("recurrence interval must be at least 1")]
    ZeroRecurrenceStep,
    /// A recurrence rule with no end date and no occurrence cap never
    /// terminates.
    #[error("recurring event needs an end date or a maximum occurrence count")]
    UnboundedRecurrence,
}

/// A calendar event as seen by the scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Unique identifier (assigned by the persistence layer).
    pub id: String,
    /// The event title, carried into conflict and slot reports.
    pub title: String,
    /// Identifier of the organizing user; opaque to the engine.
    pub organizer_id: String,
    /// What kind of event this is.
    pub kind: EventKind,
    /// Lifecycle status.
    pub status: EventStatus,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends (exclusive).
    pub end: DateTime<Utc>,
    /// Recurrence rule, if this event repeats.
    pub recurrence: Option<RecurrencePattern>,
    /// Invited participants, in invitation order.
    pub attendees: Vec<Attendee>,
}

impl ScheduledEvent {
    /// Creates a new event with required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            organizer_id: String::new(),
            kind: EventKind::default(),
            status: EventStatus::default(),
            start,
            end,
            recurrence: None,
            attendees: Vec::new(),
        }
    }

    /// Builder method to set the organizer.
    #[must_use]
    pub fn with_organizer(mut self, organizer_id: impl Into<String>) -> Self {
        self.organizer_id = organizer_id.into();
        self
    }

    /// Builder method to set the event kind.
    #[must_use]
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method to set the status.
    #[must_use]
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to attach a recurrence rule.
    #[must_use]
    pub fn with_recurrence(mut self, pattern: RecurrencePattern) -> Self {
        self.recurrence = Some(pattern);
        self
    }

    /// Builder method to add an attendee.
    #[must_use]
    pub fn with_attendee(mut self, attendee: Attendee) -> Self {
        self.attendees.push(attendee);
        self
    }

    /// Returns the event's time range.
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Returns the event duration in whole minutes, clamped to zero.
    pub fn duration_minutes(&self) -> i64 {
        self.interval().duration_minutes()
    }

    /// Returns `true` if this event repeats.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Returns `true` if this event takes up calendar time: it is not
    /// cancelled and its interval is non-empty.
    pub fn occupies_calendar(&self) -> bool {
        self.status != EventStatus::Cancelled && !self.interval().is_empty()
    }

    /// Validates the record for acceptance by the input layer.
    ///
    /// The engine's arithmetic never requires this; it degrades on
    /// malformed input instead of failing.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.start >= self.end {
            return Err(EventError::EmptyInterval);
        }
        if let Some(ref pattern) = self.recurrence {
            if pattern.interval == 0 {
                return Err(EventError::ZeroRecurrenceStep);
            }
            if pattern.end_date.is_none() && pattern.max_occurrences.is_none() {
                return Err(EventError::UnboundedRecurrence);
            }
        }
        Ok(())
    }
}
