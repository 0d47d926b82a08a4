//! Report run configuration.
//!
//! This module provides [`ReportConfig`], the configuration surface the core
//! consumes irrespective of how a caller populates it, typically from a
//! YAML file via [`ReportConfig::load`]. Credentials for the retrieval
//! collaborators are *not* part of this surface; they belong to the source
//! implementations' constructors.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ReportError, ReportResult};
use crate::models::{Engineer, WorkdaySet};

fn default_load_incidents() -> bool {
    true
}

/// Configuration for one report run.
///
/// # Example
///
/// ```
/// use oncall_pay::config::ReportConfig;
///
/// let yaml = r#"
/// subject_id: PABC123
/// chat_handle: alice
/// schedules: [SCHED1, SCHED2]
/// since: 2026-02-01T00:00:00Z
/// until: 2026-03-01T00:00:00Z
/// timezone: America/New_York
/// workdays: mon_fri
/// day_start: "09:00:00"
/// shift_length_hours: 8
/// "#;
///
/// let config: ReportConfig = serde_yaml::from_str(yaml).unwrap();
/// let engineer = config.engineer()?;
/// assert_eq!(engineer.id, "PABC123");
/// assert_eq!(engineer.timezone, chrono_tz::America::New_York);
/// # Ok::<(), oncall_pay::error::ReportError>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// External identifier of the report subject on the on-call service.
    pub subject_id: String,
    /// Optional secondary identity used for participation matching.
    #[serde(default)]
    pub chat_handle: Option<String>,
    /// Rotation schedules the subject appears on.
    pub schedules: Vec<String>,
    /// Start of the report window (inclusive), UTC.
    pub since: DateTime<Utc>,
    /// End of the report window (exclusive), UTC.
    pub until: DateTime<Utc>,
    /// IANA timezone name; resolution is validated before any retrieval.
    pub timezone: String,
    /// The recurring work week: a preset name or a weekday list.
    pub workdays: WorkdaySet,
    /// Local wall-clock start of the working day, `HH:MM:SS`.
    pub day_start: NaiveTime,
    /// Length of a working shift in hours.
    pub shift_length_hours: i64,
    /// Whether to load and classify incident participation. Defaults to
    /// true; when false the incident category stays empty.
    #[serde(default = "default_load_incidents")]
    pub load_incidents: bool,
}

impl ReportConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`ReportError::ConfigNotFound`] if the file is missing,
    /// [`ReportError::ConfigParse`] if it is not valid configuration YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<ReportConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Resolves the configured timezone name.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidTimezone`] if the runtime does not know the
    /// zone. Called before any data retrieval so a bad zone fails fast.
    pub fn timezone(&self) -> ReportResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| ReportError::InvalidTimezone {
                name: self.timezone.clone(),
            })
    }

    /// Builds the immutable engineer profile for this run.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidTimezone`] if the timezone does not resolve.
    pub fn engineer(&self) -> ReportResult<Engineer> {
        Ok(Engineer {
            id: self.subject_id.clone(),
            chat_handle: self.chat_handle.clone(),
            schedules: self.schedules.clone(),
            day_start: self.day_start,
            shift_length_hours: self.shift_length_hours,
            workdays: self.workdays,
            timezone: self.timezone()?,
        })
    }
}
