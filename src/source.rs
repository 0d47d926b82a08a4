//! Contracts with the external retrieval collaborators.
//!
//! Fetching schedule entries and incident records (network calls, auth,
//! pagination) is outside the core: the pipeline consumes these two traits
//! and nothing else. Implementations live with the caller and receive any
//! credentials or endpoint configuration through their constructors; there
//! is no ambient global state for the core to poke at.
//!
//! Calls are synchronous and blocking. Implementors must be [`Sync`] so the
//! pipeline can fan requests for independent schedules and incidents out
//! across rayon workers; any single failure aborts the whole run (a report
//! over partially-fetched data would silently understate payable hours).

use chrono::{DateTime, Utc};

use crate::error::ReportResult;
use crate::models::{Incident, LogEntry, OncallEntry};

/// Access to rendered on-call schedule assignments.
pub trait ScheduleSource: Sync {
    /// Returns the rendered assignment entries of one schedule overlapping
    /// the `[since, until)` window, in the order the service reports them.
    ///
    /// # Errors
    ///
    /// [`crate::error::ReportError::Retrieval`] on any fetch or parse
    /// failure; the pipeline treats this as fatal for the run.
    fn oncall_entries(
        &self,
        schedule_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> ReportResult<Vec<OncallEntry>>;
}

/// Access to incident records and their activity logs.
pub trait IncidentSource: Sync {
    /// Returns the incidents created in or overlapping the `[since, until)`
    /// window.
    ///
    /// # Errors
    ///
    /// [`crate::error::ReportError::Retrieval`] on any fetch or parse
    /// failure; the pipeline treats this as fatal for the run.
    fn incidents(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> ReportResult<Vec<Incident>>;

    /// Returns the ordered activity log of one incident.
    ///
    /// Fetched lazily, once per candidate incident, so implementations
    /// should not eagerly embed logs in [`IncidentSource::incidents`].
    ///
    /// # Errors
    ///
    /// [`crate::error::ReportError::Retrieval`] on any fetch or parse
    /// failure; the pipeline treats this as fatal for the run.
    fn log_entries(&self, incident_id: &str) -> ReportResult<Vec<LogEntry>>;
}
