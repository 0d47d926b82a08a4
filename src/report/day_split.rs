//! Day splitter / aggregator: calendar-day partitioning of activity sets.
//!
//! Local-midnight instants in the target timezone are generated as epoch
//! instants, never naive date math, and subtracted from each category's
//! interval set as zero-length cut points. An interval straddling a local
//! midnight splits into two fragments sharing that bound value, so total
//! duration is preserved, including across DST transitions where a local
//! day is 23 or 25 hours long.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::debug;

use crate::interval::{Interval, IntervalSet};
use crate::models::ActivityInterval;
use crate::report::resolve_local;

/// Per-day, per-category accumulated hours for one report run.
///
/// Dates iterate in ascending order; absent (date, category) cells read as
/// zero hours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBucketTable {
    buckets: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

impl DayBucketTable {
    /// Accumulated hours for one date and category; `0.0` when absent.
    pub fn hours(&self, date: NaiveDate, category: &str) -> f64 {
        self.buckets
            .get(&date)
            .and_then(|categories| categories.get(category))
            .copied()
            .unwrap_or(0.0)
    }

    /// Total hours for one category across all dates.
    pub fn category_total(&self, category: &str) -> f64 {
        self.buckets
            .values()
            .filter_map(|categories| categories.get(category))
            .sum()
    }

    /// True if no hours were attributed at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of dates with at least one attributed fragment.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Iterates `(date, {category: hours})` in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &BTreeMap<String, f64>)> {
        self.buckets.iter()
    }

    fn accumulate(&mut self, date: NaiveDate, category: &str, hours: f64) {
        *self
            .buckets
            .entry(date)
            .or_default()
            .entry(category.to_string())
            .or_insert(0.0) += hours;
    }
}

/// The local calendar date of an epoch instant in `tz`.
fn local_date(timestamp: i64, tz: Tz) -> NaiveDate {
    DateTime::from_timestamp(timestamp, 0)
        .expect("timestamp is a valid instant")
        .with_timezone(&tz)
        .date_naive()
}

/// Every local midnight spanning `[start, end]` in `tz`, as zero-length cut
/// points at their epoch instants.
fn midnight_cut_points(start: i64, end: i64, tz: Tz) -> IntervalSet {
    let first = local_date(start, tz);
    let last = local_date(end, tz);

    let mut points = Vec::new();
    let mut date = first;
    while date <= last {
        let midnight = resolve_local(tz, date.and_hms_opt(0, 0, 0).expect("valid midnight time"));
        points.push(Interval::point(midnight.timestamp()));
        date = date.succ_opt().expect("valid successor date");
    }
    points.into_iter().collect()
}

/// Partitions the activity intervals into per-day hour buckets in `tz`.
///
/// The overall span is the minimum lower bound and maximum upper bound
/// across all non-empty categories; empty categories are skipped. Each
/// fragment's `(upper − lower) / 3600` hours are attributed to the local
/// calendar date of its lower bound. Splitting never alters a category's
/// total duration.
pub fn split_into_days(activities: &[ActivityInterval], tz: Tz) -> DayBucketTable {
    let mut span: Option<(i64, i64)> = None;
    for activity in activities {
        if let (Some(lower), Some(upper)) = (
            activity.intervals.lower_bound(),
            activity.intervals.upper_bound(),
        ) {
            span = Some(match span {
                None => (lower, upper),
                Some((start, end)) => (start.min(lower), end.max(upper)),
            });
        }
    }
    let Some((start, end)) = span else {
        return DayBucketTable::default();
    };

    let midnights = midnight_cut_points(start, end, tz);
    debug!(?midnights, "midnight cut points");

    let mut table = DayBucketTable::default();
    for activity in activities {
        if activity.intervals.is_empty() {
            continue;
        }

        let by_day = activity.intervals.difference(&midnights);
        for fragment in &by_day {
            let hours = fragment.duration_secs() as f64 / 3600.0;
            let date = local_date(fragment.start(), tz);
            debug!(
                category = %activity.name,
                start = fragment.start(),
                end = fragment.end(),
                %date,
                "day fragment",
            );
            table.accumulate(date, &activity.name, hours);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    fn ts(s: &str) -> i64 {
        s.parse::<DateTime<Utc>>().unwrap().timestamp()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn activity(name: &str, ranges: &[(i64, i64)]) -> ActivityInterval {
        ActivityInterval::new(
            name,
            ranges
                .iter()
                .map(|&(s, e)| Interval::new(s, e).unwrap())
                .collect(),
        )
    }

    fn assert_hours(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected} hours, got {actual}"
        );
    }

    #[test]
    fn test_interval_within_one_day() {
        let activities = [activity(
            "waiting",
            &[(ts("2026-02-02T10:00:00Z"), ts("2026-02-02T13:30:00Z"))],
        )];

        let table = split_into_days(&activities, UTC);
        assert_eq!(table.len(), 1);
        assert_hours(table.hours(date("2026-02-02"), "waiting"), 3.5);
    }

    #[test]
    fn test_interval_straddling_utc_midnight_splits() {
        let activities = [activity(
            "waiting",
            &[(ts("2026-02-02T22:00:00Z"), ts("2026-02-03T03:00:00Z"))],
        )];

        let table = split_into_days(&activities, UTC);
        assert_eq!(table.len(), 2);
        assert_hours(table.hours(date("2026-02-02"), "waiting"), 2.0);
        assert_hours(table.hours(date("2026-02-03"), "waiting"), 3.0);
        assert_hours(table.category_total("waiting"), 5.0);
    }

    #[test]
    fn test_attribution_follows_local_midnight_not_utc() {
        // 2026-02-03 02:00-08:00 UTC is 21:00-03:00 New York wall clock:
        // three hours belong to Feb 2 and three to Feb 3 locally.
        let activities = [activity(
            "waiting",
            &[(ts("2026-02-03T02:00:00Z"), ts("2026-02-03T08:00:00Z"))],
        )];

        let table = split_into_days(&activities, New_York);
        assert_eq!(table.len(), 2);
        assert_hours(table.hours(date("2026-02-02"), "waiting"), 3.0);
        assert_hours(table.hours(date("2026-02-03"), "waiting"), 3.0);
    }

    #[test]
    fn test_spring_forward_day_has_23_hours() {
        // Full local Sunday 2026-03-08 in New York: midnight EST to midnight
        // EDT is only 23 real hours.
        let activities = [activity(
            "waiting",
            &[(ts("2026-03-08T05:00:00Z"), ts("2026-03-09T04:00:00Z"))],
        )];

        let table = split_into_days(&activities, New_York);
        assert_eq!(table.len(), 1);
        assert_hours(table.hours(date("2026-03-08"), "waiting"), 23.0);
    }

    #[test]
    fn test_fall_back_day_has_25_hours() {
        // Full local Sunday 2026-11-01 in New York: midnight EDT to midnight
        // EST is 25 real hours.
        let activities = [activity(
            "waiting",
            &[(ts("2026-11-01T04:00:00Z"), ts("2026-11-02T05:00:00Z"))],
        )];

        let table = split_into_days(&activities, New_York);
        assert_eq!(table.len(), 1);
        assert_hours(table.hours(date("2026-11-01"), "waiting"), 25.0);
    }

    #[test]
    fn test_splitting_preserves_total_duration_across_dst() {
        // A week straddling the spring-forward transition.
        let set_start = ts("2026-03-05T12:00:00Z");
        let set_end = ts("2026-03-11T18:00:00Z");
        let activities = [activity("waiting", &[(set_start, set_end)])];

        let table = split_into_days(&activities, New_York);
        let expected = (set_end - set_start) as f64 / 3600.0;
        assert_hours(table.category_total("waiting"), expected);
    }

    #[test]
    fn test_categories_accumulate_independently() {
        let activities = [
            activity(
                "waiting",
                &[(ts("2026-02-02T00:00:00Z"), ts("2026-02-02T06:00:00Z"))],
            ),
            activity(
                "incident",
                &[(ts("2026-02-02T03:00:00Z"), ts("2026-02-02T05:00:00Z"))],
            ),
        ];

        let table = split_into_days(&activities, UTC);
        assert_hours(table.hours(date("2026-02-02"), "waiting"), 6.0);
        assert_hours(table.hours(date("2026-02-02"), "incident"), 2.0);
    }

    #[test]
    fn test_empty_category_is_skipped() {
        let activities = [
            activity(
                "waiting",
                &[(ts("2026-02-02T00:00:00Z"), ts("2026-02-02T06:00:00Z"))],
            ),
            ActivityInterval::new("incident", IntervalSet::empty()),
        ];

        let table = split_into_days(&activities, UTC);
        assert_hours(table.hours(date("2026-02-02"), "incident"), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_all_empty_yields_empty_table() {
        let activities = [
            ActivityInterval::new("waiting", IntervalSet::empty()),
            ActivityInterval::new("incident", IntervalSet::empty()),
        ];
        assert!(split_into_days(&activities, UTC).is_empty());
    }

    #[test]
    fn test_multi_day_span_attributes_every_date() {
        let activities = [activity(
            "waiting",
            &[(ts("2026-02-02T00:00:00Z"), ts("2026-02-05T00:00:00Z"))],
        )];

        let table = split_into_days(&activities, UTC);
        let dates: Vec<&NaiveDate> = table.iter().map(|(d, _)| d).collect();
        assert_eq!(
            dates,
            vec![
                &date("2026-02-02"),
                &date("2026-02-03"),
                &date("2026-02-04"),
            ]
        );
        for day in &dates {
            assert_hours(table.hours(**day, "waiting"), 24.0);
        }
    }
}
