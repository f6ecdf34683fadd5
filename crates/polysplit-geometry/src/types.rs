//! Shared types for polysplit geometry processing.

use serde::{Deserialize, Serialize};

/// A 2D point in planar Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Whether both coordinates differ from `other` by at most `eps`.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

/// An ordered sequence of points connected by straight segments.
///
/// [`Polyline::new`] wraps points as given. Use [`Polyline::normalized`]
/// to build the duplicate-free form every geometry operation expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Create a polyline from raw points, dropping consecutive
    /// near-duplicates (see [`normalize`](crate::primitives::normalize)).
    #[must_use]
    pub fn normalized(points: &[Point], tolerances: &Tolerances) -> Self {
        Self(crate::primitives::normalize(points, tolerances.duplicate))
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the polyline has fewer than 2 points and so
    /// has no segments.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.0.len() < 2
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

/// Axis-aligned bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl BoundingBox {
    /// Width along the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height along the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Bounding box of `points`, or `None` when there are none.
#[must_use]
pub fn points_bounding_box<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<BoundingBox> {
    points.into_iter().fold(None, |acc: Option<BoundingBox>, p| {
        Some(acc.map_or(BoundingBox { min: *p, max: *p }, |b| BoundingBox {
            min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    })
}

/// Bounding box of every point in `polylines`, or `None` when there are
/// no points at all.
#[must_use]
pub fn polyline_bounding_box<'a>(
    polylines: impl IntoIterator<Item = &'a Polyline>,
) -> Option<BoundingBox> {
    points_bounding_box(polylines.into_iter().flat_map(Polyline::points))
}

/// Numeric tolerances shared by all geometry operations.
///
/// Held in one immutable value and passed explicitly; there is no
/// global tolerance state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Per-axis threshold under which consecutive points are treated as
    /// duplicates.
    pub duplicate: f64,

    /// Threshold under which two resolved cut positions are merged.
    pub cut_dedup: f64,

    /// Minimum arc-length span: cuts closer than this to either end are
    /// dropped, and slices shorter than this are skipped.
    pub span: f64,
}

impl Tolerances {
    /// Default duplicate-vertex tolerance.
    pub const DEFAULT_DUPLICATE: f64 = 1e-12;

    /// Default cut deduplication tolerance.
    pub const DEFAULT_CUT_DEDUP: f64 = 1e-9;

    /// Default minimum arc-length span.
    pub const DEFAULT_SPAN: f64 = 1e-12;
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            duplicate: Self::DEFAULT_DUPLICATE,
            cut_dedup: Self::DEFAULT_CUT_DEDUP,
            span: Self::DEFAULT_SPAN,
        }
    }
}

/// Configuration for batch split and sample runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Maximum distance between a candidate split point and the polyline
    /// for the candidate to be accepted as a cut.
    pub snap_tolerance: f64,

    /// Target arc-length spacing between resampled points.
    pub sample_spacing: f64,

    /// Numeric tolerances.
    pub tolerances: Tolerances,
}

impl ProcessConfig {
    /// Default snap tolerance, in coordinate units.
    pub const DEFAULT_SNAP_TOLERANCE: f64 = 0.01;

    /// Default resampling spacing, in coordinate units.
    pub const DEFAULT_SAMPLE_SPACING: f64 = 1.0;

    /// Check that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] when the snap tolerance
    /// or any numeric tolerance is negative or non-finite, or when the
    /// sample spacing is not a positive finite number.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let non_negative = [
            ("snap_tolerance", self.snap_tolerance),
            ("tolerances.duplicate", self.tolerances.duplicate),
            ("tolerances.cut_dedup", self.tolerances.cut_dedup),
            ("tolerances.span", self.tolerances.span),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !self.sample_spacing.is_finite() || self.sample_spacing <= 0.0 {
            return Err(GeometryError::InvalidConfig(format!(
                "sample_spacing must be a finite positive number, got {}",
                self.sample_spacing
            )));
        }
        Ok(())
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: Self::DEFAULT_SNAP_TOLERANCE,
            sample_spacing: Self::DEFAULT_SAMPLE_SPACING,
            tolerances: Tolerances::default(),
        }
    }
}

/// Errors surfaced by polysplit geometry operations.
///
/// Degenerate geometry never produces an error; only malformed input
/// shapes and unusable configuration do.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum GeometryError {
    /// A coordinate structure does not have the expected shape.
    #[error("invalid input shape: {0}")]
    InvalidShape(String),

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A graph node index is outside `0..node_count`.
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// An edge weight is negative or not finite.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidEdgeWeight {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
        /// The rejected weight.
        weight: f64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_new() {
        let p = Point::new(3.0, 4.0);
        assert!((p.x - 3.0).abs() < f64::EPSILON);
        assert!((p.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_equality() {
        assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
        assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
    }

    #[test]
    fn point_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_approx_eq_is_per_axis() {
        let a = Point::new(0.0, 0.0);
        assert!(a.approx_eq(Point::new(1e-13, -1e-13), 1e-12));
        assert!(!a.approx_eq(Point::new(0.0, 1e-11), 1e-12));
    }

    // --- Polyline tests ---

    #[test]
    fn polyline_accessors() {
        let pl = Polyline::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(pl.len(), 2);
        assert!(!pl.is_empty());
        assert!(!pl.is_degenerate());
        assert_eq!(pl.first(), Some(&Point::new(1.0, 2.0)));
        assert_eq!(pl.last(), Some(&Point::new(3.0, 4.0)));
    }

    #[test]
    fn polyline_normalized_drops_duplicates() {
        let raw = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ];
        let pl = Polyline::normalized(&raw, &Tolerances::default());
        assert_eq!(pl.points(), &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
    }

    #[test]
    fn single_point_polyline_is_degenerate() {
        assert!(Polyline::new(vec![Point::new(1.0, 1.0)]).is_degenerate());
        assert!(Polyline::default().is_degenerate());
    }

    #[test]
    fn polyline_serde_round_trip() {
        let pl = Polyline::new(vec![Point::new(1.5, -2.0)]);
        let json = serde_json::to_string(&pl).unwrap();
        assert_eq!(json, r#"[{"x":1.5,"y":-2.0}]"#);
        let back: Polyline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pl);
    }

    // --- Bounding box ---

    #[test]
    fn bounding_box_spans_all_polylines() {
        let a = Polyline::new(vec![Point::new(0.0, 5.0), Point::new(2.0, -1.0)]);
        let b = Polyline::new(vec![Point::new(-3.0, 1.0)]);
        let bb = polyline_bounding_box([&a, &b]);
        assert_eq!(
            bb,
            Some(BoundingBox {
                min: Point::new(-3.0, -1.0),
                max: Point::new(2.0, 5.0),
            })
        );
    }

    #[test]
    fn bounding_box_of_nothing_is_none() {
        assert_eq!(polyline_bounding_box(&[Polyline::default()]), None);
    }

    #[test]
    fn points_bounding_box_of_single_point_is_degenerate() {
        let p = Point::new(4.0, -2.0);
        let bb = points_bounding_box(&[p]).unwrap();
        assert_eq!(bb, BoundingBox { min: p, max: p });
        assert!(bb.width().abs() < f64::EPSILON);
        assert_eq!(points_bounding_box(&[] as &[Point]), None);
    }

    // --- Config ---

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ProcessConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_snap_tolerance_is_rejected() {
        let config = ProcessConfig {
            snap_tolerance: -1.0,
            ..ProcessConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeometryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_sample_spacing_is_rejected() {
        let config = ProcessConfig {
            sample_spacing: 0.0,
            ..ProcessConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeometryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn nan_tolerance_is_rejected() {
        let config = ProcessConfig {
            tolerances: Tolerances {
                cut_dedup: f64::NAN,
                ..Tolerances::default()
            },
            ..ProcessConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_with_missing_fields() {
        let config: ProcessConfig =
            serde_json::from_str(r#"{"snap_tolerance": 0.5}"#).unwrap();
        assert!((config.snap_tolerance - 0.5).abs() < f64::EPSILON);
        assert!(
            (config.sample_spacing - ProcessConfig::DEFAULT_SAMPLE_SPACING).abs() < f64::EPSILON
        );
        assert_eq!(config.tolerances, Tolerances::default());
    }

    #[test]
    fn error_messages() {
        let err = GeometryError::NodeOutOfRange {
            node: 7,
            node_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "node 7 is out of range for a graph with 3 nodes"
        );
        let err = GeometryError::InvalidShape("need 2 columns".to_owned());
        assert_eq!(err.to_string(), "invalid input shape: need 2 columns");
    }
}
