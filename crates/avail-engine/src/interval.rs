//! Half-open time intervals.
//!
//! [`Interval`] is the arithmetic primitive the whole engine is built on:
//! a `[start, end)` range of absolute UTC instants. An interval whose
//! `start >= end` is *empty* — it overlaps nothing and occupies no slot.
//! The engine never rejects malformed ranges; rejecting them is the job
//! of the validation layer above (see [`crate::event`]).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the range (inclusive).
    pub start: DateTime<Utc>,
    /// End of the range (exclusive).
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates a new interval. No ordering is enforced; an inverted or
    /// zero-length range is simply empty.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates an interval from a start instant and a duration.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    /// Returns `true` if this interval covers no instant at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the signed duration `end - start`.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the duration in whole minutes, clamped to zero for
    /// empty intervals.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes().max(0)
    }

    /// Checks if an instant falls within this interval.
    ///
    /// Half-open semantics: the start is included, the end is not.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Strict half-open overlap test.
    ///
    /// Two intervals overlap iff they share at least one instant.
    /// Touching endpoints (`self.end == other.start`) do not overlap,
    /// and an empty interval overlaps nothing.
    pub fn overlaps(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end && other.start < self.end
    }

    /// Returns the length of the overlap with `other` in whole minutes
    /// (floored), or zero when the intervals do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        (overlap_end - overlap_start).num_minutes().max(0)
    }

    /// Returns this interval expanded by a symmetric buffer on both ends.
    ///
    /// A negative buffer shrinks the interval and may make it empty.
    pub fn padded(&self, buffer_minutes: i64) -> Self {
        let buffer = Duration::minutes(buffer_minutes);
        Self {
            start: self.start - buffer,
            end: self.end + buffer,
        }
    }
}
