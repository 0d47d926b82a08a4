//! Incident participation extractor.
//!
//! For each incident created while the subject was on call, scans the
//! incident's activity log for the earliest entry matched by any
//! participation matcher and builds the closed participation interval from
//! that instant to the incident's last status change.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

use crate::error::ReportResult;
use crate::interval::{Interval, IntervalSet};
use crate::models::{Incident, LogEntry, ParticipationMatcher};
use crate::source::IncidentSource;

/// The earliest log-entry timestamp matched by any matcher, or `None` when
/// no entry identifies the subject.
pub fn participation_start(
    log: &[LogEntry],
    matchers: &[ParticipationMatcher],
) -> Option<DateTime<Utc>> {
    log.iter()
        .filter(|entry| matchers.iter().any(|matcher| matcher.matches(&entry.actor)))
        .map(|entry| entry.created_at)
        .min()
}

/// Builds the subject's incident participation set.
///
/// The candidate time range is the span of the on-call set; an empty
/// on-call set yields an empty participation set without touching the
/// source. Only incidents whose *creation* instant is contained in the
/// on-call set are considered, though a resulting interval may extend
/// beyond the on-call window. Activity logs for candidate incidents are
/// fetched in parallel; any single fetch failure aborts the run.
///
/// Incidents where no log entry matches any matcher contribute no interval,
/// as do incidents whose earliest match lies after their close instant: a
/// report must not invent payable time from an unbounded or inverted range.
pub fn build_incident_set<I>(
    source: &I,
    oncall: &IntervalSet,
    matchers: &[ParticipationMatcher],
) -> ReportResult<IntervalSet>
where
    I: IncidentSource + ?Sized,
{
    let (Some(lower), Some(upper)) = (oncall.lower_bound(), oncall.upper_bound()) else {
        return Ok(IntervalSet::empty());
    };
    let since = DateTime::from_timestamp(lower, 0).expect("oncall bound is a valid instant");
    let until = DateTime::from_timestamp(upper, 0).expect("oncall bound is a valid instant");

    let incidents = source.incidents(since, until)?;
    let candidates: Vec<&Incident> = incidents
        .iter()
        .filter(|incident| oncall.contains(incident.created_at.timestamp()))
        .collect();

    let logs: Vec<(&Incident, Vec<LogEntry>)> = candidates
        .par_iter()
        .map(|incident| {
            source
                .log_entries(&incident.id)
                .map(|log| (*incident, log))
        })
        .collect::<ReportResult<_>>()?;

    let mut ranges = Vec::new();
    for (incident, log) in &logs {
        debug!(incident = %incident.id, "candidate incident");

        let Some(started_at) = participation_start(log, matchers) else {
            debug!(incident = %incident.id, "no participating log entry");
            continue;
        };
        let closed_at = incident.last_status_change_at;
        if started_at > closed_at {
            debug!(incident = %incident.id, "participation recorded after close");
            continue;
        }

        debug!(
            incident = %incident.id,
            %started_at,
            %closed_at,
            "user participated in incident",
        );
        ranges.push(Interval::new(started_at.timestamp(), closed_at.timestamp())?);
    }

    Ok(ranges.into_iter().collect())
}
