//! Recurrence expansion for repeating events.
//!
//! [`next_occurrence`] computes one step of a series: given the anchor
//! interval, a rule, and the start of the previous occurrence, it returns
//! the next occurrence with the anchor's duration preserved exactly.
//! [`Occurrences`] drives it repeatedly as a lazy iterator.
//!
//! Month-end policy: monthly and yearly steps clamp to the last valid day
//! of the target month, so Jan 31 advanced by one month lands on Feb 28
//! (or Feb 29 in a leap year).

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A recurrence rule anchored to an event's original interval.
///
/// A rule with neither `end_date` nor `max_occurrences` describes an
/// unbounded series; the engine will keep advancing it for as long as it
/// is asked. Callers iterating such a series must impose their own cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    /// Base frequency of the series.
    pub frequency: Frequency,
    /// Step multiplier: every `interval` days/weeks/months/years.
    /// A step of zero can never advance and terminates the series.
    pub interval: u32,
    /// Last instant an occurrence may start at (inclusive).
    pub end_date: Option<DateTime<Utc>>,
    /// Total number of occurrences in the series, counting the anchor.
    pub max_occurrences: Option<u32>,
}

impl RecurrencePattern {
    /// Creates an unbounded rule with the given frequency and step.
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval,
            end_date: None,
            max_occurrences: None,
        }
    }

    /// Builder method to bound the series by a final start instant.
    #[must_use]
    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Builder method to bound the series by total occurrence count.
    #[must_use]
    pub fn with_max_occurrences(mut self, max: u32) -> Self {
        self.max_occurrences = Some(max);
        self
    }
}

/// Computes the next occurrence of a series.
///
/// `from_start` is the start of the occurrence to advance from (the
/// anchor's start for the first step, the previous result's start after
/// that). Returns `None` when the series has terminated: the candidate
/// start falls after `end_date`, or the rule's step is zero.
///
/// This function is occurrence-count-agnostic; `max_occurrences` is
/// enforced by [`Occurrences`], which tracks how many have been produced.
pub fn next_occurrence(
    original: &Interval,
    pattern: &RecurrencePattern,
    from_start: DateTime<Utc>,
) -> Option<Interval> {
    if pattern.interval == 0 {
        return None;
    }
    let step = i64::from(pattern.interval);
    let candidate_start = match pattern.frequency {
        Frequency::Daily => from_start + Duration::days(step),
        Frequency::Weekly => from_start + Duration::weeks(step),
        Frequency::Monthly => add_months(from_start, pattern.interval),
        Frequency::Yearly => add_months(from_start, pattern.interval * 12),
    };
    if let Some(end_date) = pattern.end_date {
        if candidate_start > end_date {
            return None;
        }
    }
    Some(Interval::from_duration(candidate_start, original.duration()))
}

/// Returns a lazy iterator over the further occurrences of a series,
/// starting after the anchor interval.
///
/// Honors both `end_date` and `max_occurrences` (the anchor counts as
/// occurrence one, so at most `max_occurrences - 1` items are yielded).
/// With neither bound set the iterator is infinite; callers must limit it
/// with `take` or an equivalent cap.
pub fn occurrences(original: Interval, pattern: RecurrencePattern) -> Occurrences {
    Occurrences {
        original,
        pattern,
        cursor: original.start,
        produced: 0,
    }
}

/// Iterator over the occurrences of a recurring series after its anchor.
///
/// Created by [`occurrences`]. Pull-based and lazy: each `next` call
/// performs exactly one step of date arithmetic.
#[derive(Debug, Clone)]
pub struct Occurrences {
    original: Interval,
    pattern: RecurrencePattern,
    cursor: DateTime<Utc>,
    produced: u32,
}

impl Iterator for Occurrences {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        if let Some(max) = self.pattern.max_occurrences {
            // The anchor is occurrence one.
            if self.produced.saturating_add(1) >= max {
                return None;
            }
        }
        let next = next_occurrence(&self.original, &self.pattern, self.cursor)?;
        self.cursor = next.start;
        self.produced += 1;
        Some(next)
    }
}

/// Advances an instant by whole calendar months, clamping the day of
/// month to the length of the target month. The time of day is kept.
fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let date = from.date_naive();
    let zero_based = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    let landed = NaiveDate::from_ymd_opt(year, month, day)
        .expect("day clamped to month length")
        .and_time(from.time());
    DateTime::from_naive_utc_and_offset(landed, Utc)
}

/// Number of days in the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("valid first of month")
        .pred_opt()
        .expect("has predecessor")
        .day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn hour_event(start: DateTime<Utc>) -> Interval {
        Interval::from_duration(start, Duration::hours(1))
    }

    mod next_occurrence {
        use super::*;

        #[test]
        fn daily_advances_by_days() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 3);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2025, 3, 13, 9, 0, 0));
            assert_eq!(next.end, utc(2025, 3, 13, 10, 0, 0));
        }

        #[test]
        fn weekly_advances_by_weeks() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0)); // Monday
            let pattern = RecurrencePattern::new(Frequency::Weekly, 2);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2025, 3, 24, 9, 0, 0));
        }

        #[test]
        fn monthly_keeps_day_when_possible() {
            let original = hour_event(utc(2025, 3, 15, 14, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Monthly, 1);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2025, 4, 15, 14, 0, 0));
        }

        #[test]
        fn monthly_clamps_to_month_end() {
            let original = hour_event(utc(2025, 1, 31, 10, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Monthly, 1);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2025, 2, 28, 10, 0, 0));
        }

        #[test]
        fn monthly_clamps_to_leap_day() {
            let original = hour_event(utc(2024, 1, 31, 10, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Monthly, 1);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2024, 2, 29, 10, 0, 0));
        }

        #[test]
        fn monthly_crosses_year_boundary() {
            let original = hour_event(utc(2025, 11, 30, 10, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Monthly, 3);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2026, 2, 28, 10, 0, 0));
        }

        #[test]
        fn yearly_clamps_leap_day() {
            let original = hour_event(utc(2024, 2, 29, 8, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Yearly, 1);
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2025, 2, 28, 8, 0, 0));
        }

        #[test]
        fn duration_is_preserved() {
            let original = Interval::new(utc(2025, 1, 31, 9, 0, 0), utc(2025, 1, 31, 11, 30, 0));
            for frequency in [
                Frequency::Daily,
                Frequency::Weekly,
                Frequency::Monthly,
                Frequency::Yearly,
            ] {
                let pattern = RecurrencePattern::new(frequency, 1);
                let next = next_occurrence(&original, &pattern, original.start).unwrap();
                assert_eq!(next.duration(), original.duration());
            }
        }

        #[test]
        fn terminates_past_end_date() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1)
                .with_end_date(utc(2025, 3, 10, 23, 59, 0));
            assert!(next_occurrence(&original, &pattern, original.start).is_none());
        }

        #[test]
        fn end_date_is_inclusive_of_candidate_start() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1)
                .with_end_date(utc(2025, 3, 11, 9, 0, 0));
            let next = next_occurrence(&original, &pattern, original.start).unwrap();
            assert_eq!(next.start, utc(2025, 3, 11, 9, 0, 0));
        }

        #[test]
        fn zero_step_never_advances() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 0);
            assert!(next_occurrence(&original, &pattern, original.start).is_none());
        }

        #[test]
        fn chained_calls_walk_the_series() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1);
            let first = next_occurrence(&original, &pattern, original.start).unwrap();
            let second = next_occurrence(&original, &pattern, first.start).unwrap();
            assert_eq!(second.start, utc(2025, 3, 12, 9, 0, 0));
        }
    }

    mod occurrences_iter {
        use super::*;

        #[test]
        fn weekly_series_until_end_date() {
            // Monday 10:00-11:00, weekly, end date two weeks later at 23:59.
            let original = Interval::new(utc(2025, 3, 10, 10, 0, 0), utc(2025, 3, 10, 11, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Weekly, 1)
                .with_end_date(utc(2025, 3, 24, 23, 59, 0));

            let series: Vec<_> = occurrences(original, pattern).collect();
            assert_eq!(series.len(), 2);
            assert_eq!(series[0].start, utc(2025, 3, 17, 10, 0, 0));
            assert_eq!(series[1].start, utc(2025, 3, 24, 10, 0, 0));
        }

        #[test]
        fn honors_max_occurrences() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1).with_max_occurrences(3);

            // Anchor is occurrence one, so two further occurrences.
            let series: Vec<_> = occurrences(original, pattern).collect();
            assert_eq!(series.len(), 2);
            assert_eq!(series[0].start, utc(2025, 3, 11, 9, 0, 0));
            assert_eq!(series[1].start, utc(2025, 3, 12, 9, 0, 0));
        }

        #[test]
        fn max_occurrences_of_one_yields_nothing() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1).with_max_occurrences(1);
            assert_eq!(occurrences(original, pattern).count(), 0);
        }

        #[test]
        fn unbounded_series_requires_caller_cap() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1);
            let capped: Vec<_> = occurrences(original, pattern).take(5).collect();
            assert_eq!(capped.len(), 5);
            assert_eq!(capped[4].start, utc(2025, 3, 15, 9, 0, 0));
        }

        #[test]
        fn stops_at_whichever_bound_comes_first() {
            let original = hour_event(utc(2025, 3, 10, 9, 0, 0));
            let pattern = RecurrencePattern::new(Frequency::Daily, 1)
                .with_end_date(utc(2025, 3, 12, 23, 59, 0))
                .with_max_occurrences(10);
            // End date allows only two further occurrences.
            assert_eq!(occurrences(original, pattern).count(), 2);
        }
    }

    mod calendar_math {
        use super::*;

        #[test]
        fn days_in_month_values() {
            assert_eq!(days_in_month(2025, 1), 31);
            assert_eq!(days_in_month(2025, 2), 28);
            assert_eq!(days_in_month(2024, 2), 29);
            assert_eq!(days_in_month(2025, 4), 30);
            assert_eq!(days_in_month(2025, 12), 31);
        }

        #[test]
        fn add_months_keeps_time_of_day() {
            let from = utc(2025, 5, 12, 16, 45, 30);
            assert_eq!(add_months(from, 2), utc(2025, 7, 12, 16, 45, 30));
        }

        #[test]
        fn add_months_december_wraps_year() {
            let from = utc(2025, 12, 31, 9, 0, 0);
            assert_eq!(add_months(from, 1), utc(2026, 1, 31, 9, 0, 0));
            assert_eq!(add_months(from, 2), utc(2026, 2, 28, 9, 0, 0));
        }
    }
}
