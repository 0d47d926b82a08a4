//! External input records and the participation matcher.
//!
//! These are the shapes the retrieval collaborators (see [`crate::source`])
//! hand to the core: rendered on-call assignments, incidents and their log
//! entries. All instants are UTC; the core converts to epoch seconds at the
//! interval-algebra boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Log-entry actor field holding the actor's external identifier.
pub const ACTOR_ID_FIELD: &str = "id";

/// Log-entry actor field holding the actor's display or chat name.
pub const ACTOR_NAME_FIELD: &str = "name";

/// One rendered on-call assignment from a rotation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OncallEntry {
    /// External identifier of the assigned responder.
    pub user_id: String,
    /// Start of the assignment.
    pub start: DateTime<Utc>,
    /// End of the assignment.
    pub end: DateTime<Utc>,
}

/// One incident as reported by the incident collaborator.
///
/// Log entries are not embedded; they are fetched lazily per incident via
/// [`crate::source::IncidentSource::log_entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// External identifier of the incident.
    pub id: String,
    /// When the incident was created.
    pub created_at: DateTime<Utc>,
    /// The last status change, used as the incident's close instant even if
    /// the incident is still technically open.
    pub last_status_change_at: DateTime<Utc>,
}

/// One entry in an incident's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The acting party, as a flat map of identity fields (e.g. `id`,
    /// `name`) to values.
    pub actor: HashMap<String, String>,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

/// A rule testing whether a log-entry actor corresponds to the report
/// subject: the named actor field must hold exactly the expected value.
///
/// A list of matchers is OR-combined; the earliest timestamp among entries
/// matched by *any* matcher wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationMatcher {
    /// The actor field to inspect.
    pub field: String,
    /// The value identifying the report subject.
    pub value: String,
}

impl ParticipationMatcher {
    /// Creates a matcher for `field == value`.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> ParticipationMatcher {
        ParticipationMatcher {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True if the actor's `field` holds exactly the expected value.
    pub fn matches(&self, actor: &HashMap<String, String>) -> bool {
        actor.get(&self.field).is_some_and(|v| *v == self.value)
    }
}
