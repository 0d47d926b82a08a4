//! Work schedule builder: the recurring work-hours interval set.

use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::ReportResult;
use crate::interval::{Interval, IntervalSet};
use crate::models::WorkdaySet;
use crate::report::resolve_local;

/// Generates the scheduled work-hours set for `[since, until)`.
///
/// Every calendar day spanning the window is enumerated in the subject's
/// local timezone; for each day whose weekday is in `workdays`, one interval
/// `[local day start, local day start + shift]` is generated and converted
/// to epoch seconds. The day start is resolved from the local calendar date
/// and wall-clock time, never a fixed-offset shortcut, so the window is
/// the *local* work day on either side of a DST transition. The shift
/// length is an absolute duration from the resolved start instant.
pub fn build_work_schedule(
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    workdays: WorkdaySet,
    day_start: chrono::NaiveTime,
    shift_length_hours: i64,
    tz: Tz,
) -> ReportResult<IntervalSet> {
    let first = since.with_timezone(&tz).date_naive();
    let last = until.with_timezone(&tz).date_naive();

    let mut ranges = Vec::new();
    let mut date = first;
    while date <= last {
        if workdays.contains(date.weekday()) {
            let workday_start = resolve_local(tz, date.and_time(day_start));
            let workday_end = workday_start + Duration::hours(shift_length_hours);
            debug!(%workday_start, %workday_end, "workday times");

            ranges.push(Interval::new(
                workday_start.timestamp(),
                workday_end.timestamp(),
            )?);
        }
        date = date.succ_opt().expect("valid successor date");
    }

    Ok(ranges.into_iter().collect())
}
