//! Engineer profile and the recurring workday set.

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::de::{Deserialize, Deserializer, Error as DeError};

use crate::models::records::{ACTOR_ID_FIELD, ACTOR_NAME_FIELD, ParticipationMatcher};

/// The recurring set of weekdays that make up the subject's work week.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use oncall_pay::models::WorkdaySet;
///
/// assert!(WorkdaySet::MON_FRI.contains(Weekday::Wed));
/// assert!(!WorkdaySet::MON_FRI.contains(Weekday::Sat));
/// assert!(WorkdaySet::SUN_THU.contains(Weekday::Sun));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdaySet {
    // Bit n set = the weekday n days after Monday is a workday.
    days: u8,
}

impl WorkdaySet {
    /// Monday through Friday.
    pub const MON_FRI: WorkdaySet = WorkdaySet { days: 0b0001_1111 };

    /// Sunday through Thursday.
    pub const SUN_THU: WorkdaySet = WorkdaySet { days: 0b0100_1111 };

    /// Builds a set from an explicit weekday list.
    pub fn from_weekdays(weekdays: &[Weekday]) -> WorkdaySet {
        let mut days = 0u8;
        for weekday in weekdays {
            days |= 1 << weekday.num_days_from_monday();
        }
        WorkdaySet { days }
    }

    /// True if `weekday` is part of the work week.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.days & (1 << weekday.num_days_from_monday()) != 0
    }

    /// True if no weekday is a workday.
    pub fn is_empty(&self) -> bool {
        self.days == 0
    }
}

impl<'de> Deserialize<'de> for WorkdaySet {
    /// Accepts either a preset name (`mon_fri`, `sun_thu`) or a list of
    /// weekday names (`[monday, tuesday, sunday]`).
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<WorkdaySet, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Preset(String),
            Days(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Preset(name) => match name.as_str() {
                "mon_fri" => Ok(WorkdaySet::MON_FRI),
                "sun_thu" => Ok(WorkdaySet::SUN_THU),
                other => Err(D::Error::custom(format!(
                    "unknown workday preset: {other}"
                ))),
            },
            Repr::Days(names) => {
                let mut weekdays = Vec::with_capacity(names.len());
                for name in &names {
                    let weekday: Weekday = name
                        .parse()
                        .map_err(|_| D::Error::custom(format!("unknown weekday: {name}")))?;
                    weekdays.push(weekday);
                }
                Ok(WorkdaySet::from_weekdays(&weekdays))
            }
        }
    }
}

/// The subject of one report run.
///
/// Immutable input, constructed once per run from configuration (see
/// [`crate::config::ReportConfig::engineer`]).
#[derive(Debug, Clone)]
pub struct Engineer {
    /// External identifier on the on-call service (used to filter schedule
    /// entries and to match incident log actors).
    pub id: String,
    /// Optional secondary identity (e.g. a chat handle) used as an
    /// additional participation matcher.
    pub chat_handle: Option<String>,
    /// The rotation schedules the subject appears on.
    pub schedules: Vec<String>,
    /// Local wall-clock start of the working day.
    pub day_start: NaiveTime,
    /// Length of a working shift in hours.
    pub shift_length_hours: i64,
    /// The recurring work week.
    pub workdays: WorkdaySet,
    /// The subject's timezone; also the calendar used for day splitting.
    pub timezone: Tz,
}

impl Engineer {
    /// The OR-combined matcher list identifying this engineer in incident
    /// logs: the external id, plus the chat handle when configured.
    pub fn participation_matchers(&self) -> Vec<ParticipationMatcher> {
        let mut matchers = vec![ParticipationMatcher::new(ACTOR_ID_FIELD, &self.id)];
        if let Some(handle) = &self.chat_handle {
            matchers.push(ParticipationMatcher::new(ACTOR_NAME_FIELD, handle));
        }
        matchers
    }
}
