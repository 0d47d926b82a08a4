//! Interval set algebra over epoch seconds.
//!
//! This module is the foundation the whole report engine is built on: every
//! time range in the system (on-call windows, scheduled work hours, incident
//! participation) is modelled as an [`IntervalSet`], a union of disjoint
//! closed ranges over epoch seconds, and the payable categories are derived
//! purely through [`IntervalSet::union`], [`IntervalSet::difference`] and
//! [`IntervalSet::intersection`].
//!
//! Public constructors only build closed intervals. Internally an interval
//! also tracks whether each bound is open, because set difference produces
//! half-open remainders: `[a,b] − [m,c]` leaves `[a,m) ∪ (c,b]`, and
//! subtracting the degenerate point `[m,m]` splits `[a,b]` into
//! `[a,m) ∪ (m,b]`. Bound *values* and durations are never affected by
//! openness, only instant membership, which is exactly what keeps the
//! derived pay categories disjoint while midnight splitting still preserves
//! total duration.

use crate::error::{ReportError, ReportResult};

/// Whether an interval bound includes its endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Closed,
    Open,
}

impl Bound {
    /// The bound kind a difference remainder gets at a cut made by `self`.
    fn flipped(self) -> Bound {
        match self {
            Bound::Closed => Bound::Open,
            Bound::Open => Bound::Closed,
        }
    }
}

/// A single contiguous time range over epoch seconds.
///
/// Constructed closed on both ends; degenerate single-instant intervals
/// (`start == end`) are valid and represent zero-duration membership, used
/// for instantaneous markers such as local-midnight cut points.
///
/// # Example
///
/// ```
/// use oncall_pay::interval::Interval;
///
/// let shift = Interval::new(3600, 7200)?;
/// assert_eq!(shift.duration_secs(), 3600);
///
/// // start after end is a defect, never silently repaired
/// assert!(Interval::new(7200, 3600).is_err());
/// # Ok::<(), oncall_pay::error::ReportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: i64,
    end: i64,
    left: Bound,
    right: Bound,
}

impl Interval {
    /// Creates a closed interval `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInterval`] if `start > end`.
    pub fn new(start: i64, end: i64) -> ReportResult<Interval> {
        if start > end {
            return Err(ReportError::InvalidInterval { start, end });
        }
        Ok(Interval {
            start,
            end,
            left: Bound::Closed,
            right: Bound::Closed,
        })
    }

    /// Creates the degenerate single-instant interval `[at, at]`.
    pub fn point(at: i64) -> Interval {
        Interval {
            start: at,
            end: at,
            left: Bound::Closed,
            right: Bound::Closed,
        }
    }

    /// The lower bound value, in epoch seconds.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// The upper bound value, in epoch seconds.
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The covered duration in seconds. Zero for degenerate points.
    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }

    /// True for a zero-duration single-instant interval.
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// True if `t` is a member of this interval, respecting bound openness.
    fn contains_instant(&self, t: i64) -> bool {
        let after_start = t > self.start || (t == self.start && self.left == Bound::Closed);
        let before_end = t < self.end || (t == self.end && self.right == Bound::Closed);
        after_start && before_end
    }

    /// An interval is representable unless its bounds cross, or it collapses
    /// to a single instant that an open bound excludes.
    fn is_valid(start: i64, left: Bound, end: i64, right: Bound) -> bool {
        start < end || (start == end && left == Bound::Closed && right == Bound::Closed)
    }

    /// Sort/compare key for lower bounds: at equal values a closed bound
    /// starts earlier than an open one.
    fn lower_key(&self) -> (i64, u8) {
        (self.start, (self.left == Bound::Open) as u8)
    }

    /// The set-theoretic intersection of two intervals, if non-empty.
    fn intersect(&self, other: &Interval) -> Option<Interval> {
        use std::cmp::Ordering;

        let (start, left) = match self.start.cmp(&other.start) {
            Ordering::Greater => (self.start, self.left),
            Ordering::Less => (other.start, other.left),
            Ordering::Equal => {
                let left = if self.left == Bound::Open || other.left == Bound::Open {
                    Bound::Open
                } else {
                    Bound::Closed
                };
                (self.start, left)
            }
        };
        let (end, right) = match self.end.cmp(&other.end) {
            Ordering::Less => (self.end, self.right),
            Ordering::Greater => (other.end, other.right),
            Ordering::Equal => {
                let right = if self.right == Bound::Open || other.right == Bound::Open {
                    Bound::Open
                } else {
                    Bound::Closed
                };
                (self.end, right)
            }
        };

        Interval::is_valid(start, left, end, right).then_some(Interval {
            start,
            end,
            left,
            right,
        })
    }

    /// Removes `other` from this interval, yielding zero, one or two
    /// remainders in ascending order.
    ///
    /// Remainders become open where the cut was closed, so removed instants
    /// are genuinely excluded while the remainder keeps the cut's bound
    /// value. Subtracting an interior point therefore splits the interval in
    /// two without shortening it; subtracting a point at an edge leaves the
    /// bound values untouched.
    fn subtract(&self, other: &Interval) -> Vec<Interval> {
        if self.intersect(other).is_none() {
            return vec![*self];
        }

        let mut remainders = Vec::with_capacity(2);
        if Interval::is_valid(self.start, self.left, other.start, other.left.flipped()) {
            remainders.push(Interval {
                start: self.start,
                end: other.start,
                left: self.left,
                right: other.left.flipped(),
            });
        }
        if Interval::is_valid(other.end, other.right.flipped(), self.end, self.right) {
            remainders.push(Interval {
                start: other.end,
                end: self.end,
                left: other.right.flipped(),
                right: self.right,
            });
        }
        remainders
    }

    /// True if the union of two intervals is one contiguous interval: they
    /// overlap, or they touch at a value covered by at least one of them.
    fn merges_with(&self, next: &Interval) -> bool {
        if next.start < self.end {
            return true;
        }
        next.start == self.end && (self.right == Bound::Closed || next.left == Bound::Closed)
    }
}

/// An immutable union of disjoint intervals maintained in ascending order.
///
/// All set operations are closed over this type and return values satisfying
/// the same invariants. The empty set is first-class;
/// [`lower_bound`](IntervalSet::lower_bound) and
/// [`upper_bound`](IntervalSet::upper_bound) return `None` for it rather
/// than an infinite sentinel, so unbounded values participate only as
/// identities in min/max folds and are never emitted as a final bound.
///
/// # Example
///
/// ```
/// use oncall_pay::interval::{Interval, IntervalSet};
///
/// let oncall = IntervalSet::from(Interval::new(0, 86_400)?);
/// let work = IntervalSet::from(Interval::new(32_400, 61_200)?);
///
/// let waiting = oncall.difference(&work);
/// assert_eq!(waiting.total_seconds(), 86_400 - 28_800);
/// assert_eq!(waiting.lower_bound(), Some(0));
/// assert_eq!(waiting.upper_bound(), Some(86_400));
/// # Ok::<(), oncall_pay::error::ReportError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// The empty set.
    pub fn empty() -> IntervalSet {
        IntervalSet {
            intervals: Vec::new(),
        }
    }

    /// Merges a sorted interval list into canonical disjoint ascending form.
    fn normalize(mut sorted: Vec<Interval>) -> IntervalSet {
        let mut intervals: Vec<Interval> = Vec::with_capacity(sorted.len());
        for next in sorted.drain(..) {
            match intervals.last_mut() {
                Some(current) if current.merges_with(&next) => {
                    let extend = next.end > current.end
                        || (next.end == current.end
                            && current.right == Bound::Open
                            && next.right == Bound::Closed);
                    if extend {
                        current.end = next.end;
                        current.right = next.right;
                    }
                }
                _ => intervals.push(next),
            }
        }
        IntervalSet { intervals }
    }

    /// The union of two sets. Commutative, associative and idempotent.
    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        let mut merged = Vec::with_capacity(self.intervals.len() + other.intervals.len());
        merged.extend_from_slice(&self.intervals);
        merged.extend_from_slice(&other.intervals);
        merged.sort_by_key(Interval::lower_key);
        IntervalSet::normalize(merged)
    }

    /// The set of instants contained in both sets. Commutative.
    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        let mut intervals = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.intervals.len() && j < other.intervals.len() {
            let (a, b) = (&self.intervals[i], &other.intervals[j]);
            if let Some(overlap) = a.intersect(b) {
                intervals.push(overlap);
            }
            // Advance whichever interval ends first.
            if a.end < b.end || (a.end == b.end && a.right == Bound::Open) {
                i += 1;
            } else {
                j += 1;
            }
        }
        IntervalSet { intervals }
    }

    /// The set of instants in `self` but not in `other`. Non-commutative.
    ///
    /// Subtracting a degenerate point removes no duration: an interval
    /// crossing the point is split into two fragments sharing that bound
    /// value, and a point at an interval edge leaves its bounds unchanged.
    pub fn difference(&self, other: &IntervalSet) -> IntervalSet {
        let mut intervals = Vec::new();
        for atom in &self.intervals {
            let mut remainders = vec![*atom];
            for cut in &other.intervals {
                if cut.start > atom.end {
                    break;
                }
                remainders = remainders
                    .into_iter()
                    .flat_map(|piece| piece.subtract(cut))
                    .collect();
                if remainders.is_empty() {
                    break;
                }
            }
            intervals.extend(remainders);
        }
        IntervalSet { intervals }
    }

    /// True if the set contains no instants.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// True if `instant` is a member of the set.
    pub fn contains(&self, instant: i64) -> bool {
        self.intervals
            .iter()
            .any(|interval| interval.contains_instant(instant))
    }

    /// The smallest bound value in the set, or `None` if empty.
    pub fn lower_bound(&self) -> Option<i64> {
        self.intervals.first().map(Interval::start)
    }

    /// The largest bound value in the set, or `None` if empty.
    pub fn upper_bound(&self) -> Option<i64> {
        self.intervals.last().map(Interval::end)
    }

    /// Total covered duration in seconds.
    pub fn total_seconds(&self) -> i64 {
        self.intervals.iter().map(Interval::duration_secs).sum()
    }

    /// Number of disjoint constituent intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Iterates the disjoint constituent intervals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }
}

impl From<Interval> for IntervalSet {
    fn from(interval: Interval) -> IntervalSet {
        IntervalSet {
            intervals: vec![interval],
        }
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> IntervalSet {
        let mut intervals: Vec<Interval> = iter.into_iter().collect();
        intervals.sort_by_key(Interval::lower_key);
        IntervalSet::normalize(intervals)
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ival(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    fn set(ranges: &[(i64, i64)]) -> IntervalSet {
        ranges.iter().map(|&(s, e)| ival(s, e)).collect()
    }

    // ==========================================================================
    // Construction
    // ==========================================================================

    #[test]
    fn test_new_rejects_start_after_end() {
        let result = Interval::new(10, 5);
        match result {
            Err(ReportError::InvalidInterval { start, end }) => {
                assert_eq!(start, 10);
                assert_eq!(end, 5);
            }
            other => panic!("Expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_point_is_valid() {
        let point = Interval::new(42, 42).unwrap();
        assert!(point.is_point());
        assert_eq!(point.duration_secs(), 0);
        assert_eq!(point, Interval::point(42));
    }

    // ==========================================================================
    // Union
    // ==========================================================================

    #[test]
    fn test_union_merges_overlapping() {
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 15)]);
        assert_eq!(a.union(&b), set(&[(0, 15)]));
    }

    #[test]
    fn test_union_merges_touching() {
        let a = set(&[(0, 10)]);
        let b = set(&[(10, 20)]);
        assert_eq!(a.union(&b), set(&[(0, 20)]));
        assert_eq!(a.union(&b).len(), 1);
    }

    #[test]
    fn test_union_keeps_disjoint_apart() {
        let a = set(&[(0, 10)]);
        let b = set(&[(20, 30)]);
        let u = a.union(&b);
        assert_eq!(u.len(), 2);
        assert_eq!(u.total_seconds(), 20);
    }

    #[test]
    fn test_union_is_idempotent() {
        let a = set(&[(0, 10), (20, 30)]);
        let b = set(&[(5, 25)]);
        let once = a.union(&b);
        assert_eq!(once.union(&b), once);
    }

    #[test]
    fn test_union_is_commutative() {
        let a = set(&[(0, 10), (40, 50)]);
        let b = set(&[(5, 45)]);
        assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let a = set(&[(0, 10)]);
        assert_eq!(a.union(&IntervalSet::empty()), a);
        assert_eq!(IntervalSet::empty().union(&a), a);
    }

    // ==========================================================================
    // Difference
    // ==========================================================================

    #[test]
    fn test_difference_carves_middle() {
        let a = set(&[(0, 10)]);
        let b = set(&[(3, 5)]);
        let d = a.difference(&b);
        assert_eq!(d.len(), 2);
        let pieces: Vec<(i64, i64)> = d.iter().map(|i| (i.start(), i.end())).collect();
        assert_eq!(pieces, vec![(0, 3), (5, 10)]);
        assert_eq!(d.total_seconds(), 8);
    }

    #[test]
    fn test_difference_with_self_is_empty() {
        let a = set(&[(0, 10), (20, 30)]);
        assert!(a.difference(&a).is_empty());
    }

    #[test]
    fn test_difference_of_points_with_self_is_empty() {
        let p: IntervalSet = [Interval::point(5)].into_iter().collect();
        assert!(p.difference(&p).is_empty());
    }

    #[test]
    fn test_difference_point_splits_interval_without_losing_duration() {
        let a = set(&[(0, 10)]);
        let cut: IntervalSet = [Interval::point(4)].into_iter().collect();
        let d = a.difference(&cut);
        assert_eq!(d.len(), 2);
        let pieces: Vec<(i64, i64)> = d.iter().map(|i| (i.start(), i.end())).collect();
        assert_eq!(pieces, vec![(0, 4), (4, 10)]);
        assert_eq!(d.total_seconds(), 10);
        // The cut instant itself is excluded from membership.
        assert!(!d.contains(4));
        assert!(d.contains(3));
        assert!(d.contains(5));
    }

    #[test]
    fn test_difference_point_at_edge_leaves_bounds_unchanged() {
        let a = set(&[(0, 10)]);
        let cut: IntervalSet = [Interval::point(0)].into_iter().collect();
        let d = a.difference(&cut);
        assert_eq!(d.len(), 1);
        assert_eq!(d.lower_bound(), Some(0));
        assert_eq!(d.upper_bound(), Some(10));
        assert_eq!(d.total_seconds(), 10);
    }

    #[test]
    fn test_difference_removed_boundary_is_excluded() {
        // [0,10] − [5,10] leaves [0,5); instants 5..=10 are all gone.
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 10)]);
        let d = a.difference(&b);
        assert_eq!(d.total_seconds(), 5);
        assert!(d.contains(4));
        assert!(!d.contains(5));
        assert!(!d.contains(10));
    }

    #[test]
    fn test_difference_with_disjoint_is_identity() {
        let a = set(&[(0, 10)]);
        let b = set(&[(20, 30)]);
        assert_eq!(a.difference(&b), a);
    }

    #[test]
    fn test_difference_spanning_multiple_atoms() {
        let a = set(&[(0, 10), (20, 30), (40, 50)]);
        let b = set(&[(5, 45)]);
        let d = a.difference(&b);
        let pieces: Vec<(i64, i64)> = d.iter().map(|i| (i.start(), i.end())).collect();
        assert_eq!(pieces, vec![(0, 5), (45, 50)]);
    }

    // ==========================================================================
    // Intersection
    // ==========================================================================

    #[test]
    fn test_intersection_basic() {
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 15)]);
        assert_eq!(a.intersection(&b), set(&[(5, 10)]));
    }

    #[test]
    fn test_intersection_is_commutative() {
        let a = set(&[(0, 10), (20, 30)]);
        let b = set(&[(5, 25)]);
        assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn test_intersection_of_touching_closed_is_a_point() {
        let a = set(&[(0, 10)]);
        let b = set(&[(10, 20)]);
        let i = a.intersection(&b);
        assert_eq!(i.len(), 1);
        assert_eq!(i.total_seconds(), 0);
        assert!(i.contains(10));
    }

    #[test]
    fn test_difference_remainder_is_disjoint_from_subtrahend() {
        // The regression the pay classifier depends on: what subtraction
        // removed can never reappear in an intersection with the remainder.
        let a = set(&[(0, 100)]);
        let b = set(&[(40, 60)]);
        let d = a.difference(&b);
        assert!(d.intersection(&b).is_empty());
    }

    #[test]
    fn test_partition_identity() {
        // A = (A − B) ∪ (A ∩ B)
        let a = set(&[(0, 10), (20, 30)]);
        let b = set(&[(5, 25)]);
        let rebuilt = a.union(&a.difference(&b)).union(&a.intersection(&b));
        assert_eq!(rebuilt, a);
    }

    // ==========================================================================
    // Queries
    // ==========================================================================

    #[test]
    fn test_contains_respects_closed_bounds() {
        let a = set(&[(0, 10)]);
        assert!(a.contains(0));
        assert!(a.contains(10));
        assert!(!a.contains(11));
        assert!(!a.contains(-1));
    }

    #[test]
    fn test_bounds_of_empty_set_are_none() {
        let empty = IntervalSet::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.lower_bound(), None);
        assert_eq!(empty.upper_bound(), None);
        assert_eq!(empty.total_seconds(), 0);
        assert!(!empty.contains(0));
    }

    #[test]
    fn test_bounds_span_all_atoms() {
        let a = set(&[(20, 30), (0, 10), (40, 50)]);
        assert_eq!(a.lower_bound(), Some(0));
        assert_eq!(a.upper_bound(), Some(50));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_collect_normalizes_unsorted_overlapping_input() {
        let collected: IntervalSet = [ival(20, 30), ival(0, 12), ival(10, 22)]
            .into_iter()
            .collect();
        assert_eq!(collected, set(&[(0, 30)]));
    }
}
