//! CSV rendering of the day bucket table.
//!
//! A thin adapter: the core's output is the structured
//! [`DayBucketTable`](crate::report::DayBucketTable) plus the fixed category
//! name list; this module serializes it as delimited text with a
//! `Date,<category1>,<category2>,...` header and one row per date,
//! ascending.

use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::models::ActivityInterval;
use crate::report::DayBucketTable;

fn render_error(e: csv::Error) -> ReportError {
    ReportError::Render {
        message: e.to_string(),
    }
}

/// The column order for a classified activity list.
pub fn category_names(activities: &[ActivityInterval]) -> Vec<&str> {
    activities
        .iter()
        .map(|activity| activity.name.as_str())
        .collect()
}

/// Writes the table as CSV with the given category column order.
///
/// Dates render ascending; a category with no hours on a date renders as
/// `0`.
///
/// # Errors
///
/// [`ReportError::Render`] if the underlying writer fails.
pub fn write_csv<W: Write>(
    writer: W,
    table: &DayBucketTable,
    categories: &[&str],
) -> ReportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Date".to_string()];
    header.extend(categories.iter().map(|name| (*name).to_string()));
    csv_writer.write_record(&header).map_err(render_error)?;

    for (date, _) in table.iter() {
        let mut row = vec![date.to_string()];
        for category in categories {
            row.push(table.hours(*date, category).to_string());
        }
        csv_writer.write_record(&row).map_err(render_error)?;
    }

    csv_writer.flush().map_err(|e| ReportError::Render {
        message: e.to_string(),
    })
}

/// Splits classified activity into day buckets and writes the CSV report.
///
/// Convenience for callers holding the classifier output directly; the
/// column order is the activity list order.
///
/// # Errors
///
/// [`ReportError::Render`] if the underlying writer fails.
pub fn write_report<W: Write>(
    writer: W,
    activities: &[ActivityInterval],
    tz: chrono_tz::Tz,
) -> ReportResult<()> {
    let table = crate::report::split_into_days(activities, tz);
    write_csv(writer, &table, &category_names(activities))
}
