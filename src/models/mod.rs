//! Core data models for the on-call pay report engine.
//!
//! This module contains all the domain values passed through the report
//! pipeline: the engineer profile under report, the external records fetched
//! by retrieval collaborators, and the classified activity intervals.

mod activity;
mod engineer;
mod records;

pub use activity::ActivityInterval;
pub use engineer::{Engineer, WorkdaySet};
pub use records::{
    ACTOR_ID_FIELD, ACTOR_NAME_FIELD, Incident, LogEntry, OncallEntry, ParticipationMatcher,
};
