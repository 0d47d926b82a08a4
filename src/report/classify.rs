//! Pay classifier: derives the payable categories by set difference.

use crate::interval::IntervalSet;
use crate::models::ActivityInterval;

/// Category name for on-call time outside work hours with no incident work.
pub const WAITING: &str = "waiting";

/// Category name for active incident work outside work hours.
pub const INCIDENT: &str = "incident";

/// Combines the three input sets into the payable activity categories.
///
/// Pure combination, no I/O. The subtraction order is load-bearing:
///
/// 1. `waiting candidate = oncall − work schedule`
/// 2. `waiting = waiting candidate − incident participation`
/// 3. `incident = incident participation − work schedule`
///
/// which makes the two categories disjoint by construction: no instant is
/// ever counted as both waiting and incident pay, and incident work during
/// normal hours is not separately payable. Reordering the differences
/// changes the result and is a behavioral regression.
///
/// Returns exactly two categories, [`WAITING`] then [`INCIDENT`]; the order
/// fixes the report column order.
pub fn classify(
    oncall: &IntervalSet,
    work_schedule: &IntervalSet,
    incident_participation: &IntervalSet,
) -> Vec<ActivityInterval> {
    let waiting_candidate = oncall.difference(work_schedule);
    let waiting_pay = waiting_candidate.difference(incident_participation);
    let incident_pay = incident_participation.difference(work_schedule);

    vec![
        ActivityInterval::new(WAITING, waiting_pay),
        ActivityInterval::new(INCIDENT, incident_pay),
    ]
}
