//! The report pipeline: from raw on-call records to classified activity.
//!
//! Data flow, leaves first: the oncall builder merges per-schedule
//! assignments into one interval set; the work schedule builder generates
//! the recurring work-hours set; the incident extractor derives the
//! subject's participation set; the classifier combines the three by set
//! difference into `"waiting"` and `"incident"` activity; the day splitter
//! partitions both into per-day hour buckets in a target timezone.

mod classify;
mod day_split;
mod incidents;
mod oncall;
mod workweek;

pub use classify::{INCIDENT, WAITING, classify};
pub use day_split::{DayBucketTable, split_into_days};
pub use incidents::{build_incident_set, participation_start};
pub use oncall::build_oncall_set;
pub use workweek::build_work_schedule;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::ReportResult;
use crate::interval::IntervalSet;
use crate::models::{ActivityInterval, Engineer};
use crate::source::{IncidentSource, ScheduleSource};

/// Resolves a local wall-clock time to a UTC instant, IANA-aware.
///
/// On a fall-back transition the wall-clock time occurs twice; the earlier
/// instant is used. On a spring-forward transition the wall-clock time may
/// not exist; the first valid instant after the gap is used.
pub(crate) fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = local;
    for _ in 0..8 {
        match tz.from_local_datetime(&candidate) {
            chrono::LocalResult::Single(instant) => return instant.with_timezone(&Utc),
            chrono::LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            chrono::LocalResult::None => candidate += Duration::minutes(30),
        }
    }
    // No real zone skips more than a few hours of wall-clock time.
    Utc.from_utc_datetime(&local)
}

/// Runs the full classification pipeline for one engineer over
/// `[since, until)`.
///
/// Returns `Ok(None)` when the engineer had no on-call time in the window,
/// including a window of zero-length assignments only. This is an expected
/// terminal outcome, not a failure; the caller should emit no report rows
/// and exit successfully. Otherwise returns the classified
/// activity intervals, `"waiting"` first, ready for
/// [`split_into_days`] and rendering.
///
/// `load_incidents` disables the incident extraction pass entirely; the
/// incident category then stays empty and all off-hours on-call time counts
/// as waiting.
///
/// # Errors
///
/// Propagates retrieval failures from either source (fatal, no partial
/// report) and [`crate::error::ReportError::InvalidInterval`] on defective
/// input records.
pub fn generate_activity_intervals<S, I>(
    schedule_source: &S,
    incident_source: &I,
    engineer: &Engineer,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    load_incidents: bool,
) -> ReportResult<Option<Vec<ActivityInterval>>>
where
    S: ScheduleSource + ?Sized,
    I: IncidentSource + ?Sized,
{
    let oncall = build_oncall_set(
        schedule_source,
        &engineer.schedules,
        since,
        until,
        &engineer.id,
    )?;
    debug!(?oncall, "entire oncall range");

    // A set of zero-length assignments covers no payable time either.
    if oncall.total_seconds() == 0 {
        debug!("engineer was not oncall during the report window");
        return Ok(None);
    }

    let work_schedule = build_work_schedule(
        since,
        until,
        engineer.workdays,
        engineer.day_start,
        engineer.shift_length_hours,
        engineer.timezone,
    )?;
    debug!(?work_schedule, "entire work schedule");

    let incident_set = if load_incidents {
        build_incident_set(incident_source, &oncall, &engineer.participation_matchers())?
    } else {
        IntervalSet::empty()
    };
    debug!(?incident_set, "incident participation");

    Ok(Some(classify(&oncall, &work_schedule, &incident_set)))
}
