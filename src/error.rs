//! Error types for the on-call pay report engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while building a report.
//!
//! An engineer with no on-call time in the report window is deliberately
//! *not* an error: the pipeline surfaces that terminal outcome as `Ok(None)`
//! (see [`crate::report::generate_activity_intervals`]) and the caller emits
//! no report rows.

use thiserror::Error;

/// The main error type for the on-call pay report engine.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle failures consistently throughout the pipeline.
///
/// # Example
///
/// ```
/// use oncall_pay::error::ReportError;
///
/// let error = ReportError::InvalidTimezone {
///     name: "Mars/Olympus_Mons".to_string(),
/// };
/// assert_eq!(error.to_string(), "unknown timezone: Mars/Olympus_Mons");
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// An interval was constructed with its start after its end.
    ///
    /// Always a data or logic defect upstream; never recoverable and never
    /// repaired by swapping the bounds.
    #[error("invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        /// The offending start instant, in epoch seconds.
        start: i64,
        /// The offending end instant, in epoch seconds.
        end: i64,
    },

    /// The configuration names a timezone the runtime cannot resolve.
    #[error("unknown timezone: {name}")]
    InvalidTimezone {
        /// The timezone name that failed to resolve.
        name: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A retrieval collaborator failed to fetch external records.
    ///
    /// Fatal for the run: interval algebra over incomplete data would
    /// silently understate payable hours, so no partial report is produced.
    #[error("failed to retrieve {what}: {message}")]
    Retrieval {
        /// What was being fetched (e.g. a schedule or incident identifier).
        what: String,
        /// A description of the underlying failure.
        message: String,
    },

    /// The report could not be written to its output.
    #[error("failed to write report: {message}")]
    Render {
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return [`ReportError`].
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_interval_displays_bounds() {
        let error = ReportError::InvalidInterval {
            start: 100,
            end: 50,
        };
        assert_eq!(
            error.to_string(),
            "invalid interval: start 100 is after end 50"
        );
    }

    #[test]
    fn test_invalid_timezone_displays_name() {
        let error = ReportError::InvalidTimezone {
            name: "Not/AZone".to_string(),
        };
        assert_eq!(error.to_string(), "unknown timezone: Not/AZone");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = ReportError::ConfigNotFound {
            path: "/missing/report.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "configuration file not found: /missing/report.yaml"
        );
    }

    #[test]
    fn test_config_parse_displays_path_and_message() {
        let error = ReportError::ConfigParse {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_retrieval_displays_subject_and_message() {
        let error = ReportError::Retrieval {
            what: "schedule SCHED123".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "failed to retrieve schedule SCHED123: connection refused"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ReportError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_retrieval_error() -> ReportResult<()> {
            Err(ReportError::Retrieval {
                what: "incidents".to_string(),
                message: "timeout".to_string(),
            })
        }

        fn propagates_error() -> ReportResult<()> {
            returns_retrieval_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
