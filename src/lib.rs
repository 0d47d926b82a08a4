//! On-call compensation reporting engine.
//!
//! Converts raw on-call schedule assignments and incident activity into
//! per-day payable hours, split into two disjoint categories:
//!
//! - **waiting**: on call outside normal work hours, no incident work
//! - **incident**: actively working an incident outside normal work hours
//!
//! The engine is built on a closed-interval set algebra over epoch seconds
//! ([`interval`]); classification is pure set difference ([`report`]); day
//! attribution follows local midnights in an IANA timezone, correct across
//! DST transitions. Retrieval is abstracted behind the [`source`] traits so
//! the pipeline can run against any on-call provider or an in-memory
//! fixture.
//!
//! # Example
//!
//! ```no_run
//! use oncall_pay::config::ReportConfig;
//! use oncall_pay::report::generate_activity_intervals;
//! use oncall_pay::render::write_report;
//! # use oncall_pay::source::{ScheduleSource, IncidentSource};
//! # fn run(
//! #     schedules: &dyn ScheduleSource,
//! #     incidents: &dyn IncidentSource,
//! # ) -> Result<(), oncall_pay::error::ReportError> {
//! let config = ReportConfig::load("report.yaml")?;
//! let engineer = config.engineer()?;
//!
//! let activities = generate_activity_intervals(
//!     schedules,
//!     incidents,
//!     &engineer,
//!     config.since,
//!     config.until,
//!     config.load_incidents,
//! )?;
//!
//! if let Some(activities) = activities {
//!     write_report(std::io::stdout(), &activities, engineer.timezone)?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod interval;
pub mod models;
pub mod render;
pub mod report;
pub mod source;
