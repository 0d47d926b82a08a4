//! Oncall window builder: merges per-schedule assignments into one set.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

use crate::error::ReportResult;
use crate::interval::{Interval, IntervalSet};
use crate::models::OncallEntry;
use crate::source::ScheduleSource;

/// Builds the subject's total on-call presence over `[since, until)`.
///
/// Entries for all schedules are fetched in parallel; any single fetch
/// failure aborts the run. Entries belonging to other users are discarded,
/// and the remaining ranges are unioned across all schedules into one
/// [`IntervalSet`]. An empty result is not an error: it means the subject
/// simply was not on call, and the caller treats it as "nothing to report".
///
/// # Errors
///
/// Propagates retrieval failures, and
/// [`crate::error::ReportError::InvalidInterval`] if the service reports an
/// assignment ending before it starts.
pub fn build_oncall_set<S>(
    source: &S,
    schedule_ids: &[String],
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    user_id: &str,
) -> ReportResult<IntervalSet>
where
    S: ScheduleSource + ?Sized,
{
    let batches: Vec<Vec<OncallEntry>> = schedule_ids
        .par_iter()
        .map(|schedule_id| source.oncall_entries(schedule_id, since, until))
        .collect::<ReportResult<_>>()?;

    let mut ranges = Vec::new();
    for entry in batches.iter().flatten() {
        if entry.user_id != user_id {
            debug!(user_id = %entry.user_id, "skipping entry for other user");
            continue;
        }
        debug!(start = %entry.start, end = %entry.end, "found oncall entry");
        ranges.push(Interval::new(entry.start.timestamp(), entry.end.timestamp())?);
    }

    Ok(ranges.into_iter().collect())
}
