//! Arc-length parameterization of a polyline.
//!
//! [`ArcLengthTable`] caches the cumulative distance to every vertex.
//! [`MeasuredPolyline`] owns a normalized polyline together with its
//! table so the two can never drift apart: the table is derived once at
//! construction and never mutated.

use crate::primitives::cumulative_lengths;
use crate::types::{Point, Polyline, Tolerances};

/// Cumulative arc length at every vertex of a polyline.
///
/// Same length as the polyline it was built from, non-decreasing, and
/// starting at 0 when non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable(Vec<f64>);

impl ArcLengthTable {
    /// Build the table for `polyline`.
    #[must_use]
    pub fn new(polyline: &Polyline) -> Self {
        Self(cumulative_lengths(polyline.points()))
    }

    /// Total length of the polyline (0 for empty or single-point input).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// Cumulative distance at vertex `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Number of entries (equal to the polyline's point count).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the table of an empty polyline.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All cumulative distances.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Index `i` of the segment containing `target`, i.e. the one with
    /// `table[i] <= target < table[i + 1]`.
    ///
    /// Only meaningful for `0 < target < total`.
    fn segment_index(&self, target: f64) -> usize {
        // First vertex strictly beyond the target; the segment starts one
        // before it.
        let upper = self.0.partition_point(|&d| d <= target);
        upper.saturating_sub(1).min(self.0.len().saturating_sub(2))
    }
}

/// A normalized polyline paired with its arc-length table.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredPolyline {
    polyline: Polyline,
    table: ArcLengthTable,
}

impl MeasuredPolyline {
    /// Normalize `points` and measure the result.
    #[must_use]
    pub fn new(points: &[Point], tolerances: &Tolerances) -> Self {
        Self::from_normalized(Polyline::normalized(points, tolerances))
    }

    /// Measure a polyline that is already free of consecutive duplicates.
    #[must_use]
    pub fn from_normalized(polyline: Polyline) -> Self {
        let table = ArcLengthTable::new(&polyline);
        Self { polyline, table }
    }

    /// The underlying polyline.
    #[must_use]
    pub const fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    /// The vertices of the underlying polyline.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        self.polyline.points()
    }

    /// The cumulative arc-length table.
    #[must_use]
    pub const fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// Total arc length.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.table.total()
    }

    /// Consume and return the underlying polyline.
    #[must_use]
    pub fn into_polyline(self) -> Polyline {
        self.polyline
    }

    /// Point at arc-length distance `target` from the start.
    ///
    /// Targets at or before 0 return the first vertex and targets at or
    /// beyond the total length return the last vertex, both exactly.
    /// Returns `None` only for an empty polyline.
    ///
    /// # Examples
    ///
    /// ```
    /// use polysplit_geometry::{MeasuredPolyline, Point, Tolerances};
    ///
    /// let line = MeasuredPolyline::new(
    ///     &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
    ///     &Tolerances::default(),
    /// );
    /// assert_eq!(line.point_at(15.0), Some(Point::new(10.0, 5.0)));
    /// assert_eq!(line.point_at(-3.0), Some(Point::new(0.0, 0.0)));
    /// ```
    #[must_use]
    pub fn point_at(&self, target: f64) -> Option<Point> {
        let points = self.points();
        let (&first, &last) = (points.first()?, points.last()?);

        if target <= 0.0 {
            return Some(first);
        }
        if self.total_length() <= target {
            return Some(last);
        }

        let i = self.table.segment_index(target);
        let (Some(start), Some(end)) = (self.table.get(i), self.table.get(i + 1)) else {
            return Some(last);
        };
        let a = points[i];
        let seg_len = end - start;
        if seg_len <= 0.0 {
            return Some(a);
        }

        let b = points[i + 1];
        let t = (target - start) / seg_len;
        Some(Point::new(
            (b.x - a.x).mul_add(t, a.x),
            (b.y - a.y).mul_add(t, a.y),
        ))
    }
}
