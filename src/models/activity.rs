//! Named activity categories produced by the pay classifier.

use crate::interval::IntervalSet;

/// A payable activity category paired with all time attributed to it over
/// the report window.
///
/// The classifier emits exactly two of these, `"waiting"` then `"incident"`,
/// but nothing downstream hardcodes the count: the day splitter and the CSV
/// adapter treat any list of (name, set) pairs uniformly, and the list order
/// fixes the output column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInterval {
    /// Category name, used as the report column header.
    pub name: String,
    /// All payable time in this category.
    pub intervals: IntervalSet,
}

impl ActivityInterval {
    /// Creates a named activity category.
    pub fn new(name: impl Into<String>, intervals: IntervalSet) -> ActivityInterval {
        ActivityInterval {
            name: name.into(),
            intervals,
        }
    }
}
