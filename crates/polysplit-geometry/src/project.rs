//! Closest-point projection onto segments and polylines.
//!
//! [`project_point_to_segment`] is the numerical kernel every
//! higher-level operation builds on. The projection parameter is clamped
//! to `[0, 1]`, so results never extrapolate past a segment's endpoints.

use crate::arc_length::MeasuredPolyline;
use crate::types::Point;

/// Result of projecting a point onto a single segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Position along the segment in `[0, 1]`.
    pub t: f64,
    /// Closest point on the segment.
    pub point: Point,
    /// Distance from the query point to [`point`](Self::point).
    pub distance: f64,
}

/// Project `p` onto the segment from `a` to `b`.
///
/// A degenerate segment (`a == b`) projects everything onto `a` with
/// `t = 0`.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::Point;
/// use polysplit_geometry::project::project_point_to_segment;
///
/// let proj = project_point_to_segment(
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(4.0, 3.0),
/// );
/// assert_eq!(proj.point, Point::new(4.0, 0.0));
/// assert!((proj.t - 0.4).abs() < 1e-12);
/// assert!((proj.distance - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn project_point_to_segment(a: Point, b: Point, p: Point) -> SegmentProjection {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let seg_len2 = vx.mul_add(vx, vy * vy);

    let t = if seg_len2 <= 0.0 {
        0.0
    } else {
        let wx = p.x - a.x;
        let wy = p.y - a.y;
        (wx.mul_add(vx, wy * vy) / seg_len2).clamp(0.0, 1.0)
    };

    // Endpoints are returned verbatim so t in {0, 1} is exact.
    let point = if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        Point::new(vx.mul_add(t, a.x), vy.mul_add(t, a.y))
    };

    SegmentProjection {
        t,
        point,
        distance: p.distance(point),
    }
}

/// Result of projecting a point onto a whole polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineProjection {
    /// Arc-length distance from the polyline start to
    /// [`closest`](Self::closest), in `[0, total length]`.
    pub position: f64,
    /// Closest point on the polyline.
    pub closest: Point,
    /// Distance from the query point to [`closest`](Self::closest).
    pub distance: f64,
}

/// Project `p` onto every segment of `line` and keep the closest.
///
/// Segments are scanned in order and only a strictly smaller distance
/// replaces the current best, so the first segment achieving the
/// minimum wins ties.
///
/// Degenerate polylines fall back rather than fail: an empty polyline
/// returns `p` itself at position 0 and distance 0; a single-point
/// polyline returns that point at position 0 with its distance to `p`.
#[must_use]
pub fn project_point_onto_polyline(line: &MeasuredPolyline, p: Point) -> PolylineProjection {
    let points = line.points();
    match points {
        [] => PolylineProjection {
            position: 0.0,
            closest: p,
            distance: 0.0,
        },
        [only] => PolylineProjection {
            position: 0.0,
            closest: *only,
            distance: only.distance(p),
        },
        _ => {
            let cum = line.table().as_slice();
            let mut best = PolylineProjection {
                position: 0.0,
                closest: points[0],
                distance: f64::INFINITY,
            };
            for (i, pair) in points.windows(2).enumerate() {
                let proj = project_point_to_segment(pair[0], pair[1], p);
                if proj.distance < best.distance {
                    best = PolylineProjection {
                        position: proj.t.mul_add(pair[0].distance(pair[1]), cum[i]),
                        closest: proj.point,
                        distance: proj.distance,
                    };
                }
            }
            best
        }
    }
}
