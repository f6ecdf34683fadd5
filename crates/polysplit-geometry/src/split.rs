//! Segment building: slice a polyline at a sorted list of cut positions.
//!
//! Each slice starts and ends at interpolated points and carries every
//! original vertex that lies strictly inside it. Interior vertices are
//! copied verbatim, never re-interpolated, so splitting does not move
//! any existing geometry.

use crate::arc_length::MeasuredPolyline;
use crate::cuts::{CutList, resolve_cuts};
use crate::primitives::normalize;
use crate::types::{Point, Polyline, Tolerances};

/// Slice `line` between every pair of consecutive `cuts`.
///
/// Pairs closer than [`Tolerances::span`] are skipped. Each slice is
/// normalized, and slices left with fewer than 2 points are dropped
/// (they span zero length). `cuts` must be sorted ascending; a
/// [`CutList`] always is.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::{MeasuredPolyline, Point, Tolerances};
/// use polysplit_geometry::split::build_segments;
///
/// let tol = Tolerances::default();
/// let line = MeasuredPolyline::new(
///     &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
///     &tol,
/// );
/// let segments = build_segments(&line, &[0.0, 5.0, 20.0], &tol);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].points(), &[
///     Point::new(5.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
/// ]);
/// ```
#[must_use = "returns the split segments"]
pub fn build_segments(
    line: &MeasuredPolyline,
    cuts: &[f64],
    tolerances: &Tolerances,
) -> Vec<Polyline> {
    let points = line.points();
    let cum = line.table().as_slice();
    let eps = tolerances.span;

    let mut segments = Vec::with_capacity(cuts.len().saturating_sub(1));
    for pair in cuts.windows(2) {
        let (d0, d1) = (pair[0], pair[1]);
        if d1 - d0 <= eps {
            continue;
        }
        let (Some(start), Some(end)) = (line.point_at(d0), line.point_at(d1)) else {
            continue;
        };

        let mut slice: Vec<Point> = Vec::new();
        slice.push(start);
        // The first and last vertices are reached through interpolation.
        let inner = 1..points.len().saturating_sub(1);
        slice.extend(
            inner
                .filter(|&vi| d0 + eps < cum[vi] && cum[vi] < d1 + eps)
                .map(|vi| points[vi]),
        );
        slice.push(end);

        let slice = normalize(&slice, tolerances.duplicate);
        if slice.len() < 2 {
            tracing::trace!(d0, d1, "dropping zero-length slice");
            continue;
        }
        segments.push(Polyline::new(slice));
    }
    segments
}

/// Split `line` at the points of `candidates` that lie within
/// `snap_tolerance` of it.
///
/// Convenience wrapper over [`resolve_cuts`] and [`build_segments`].
/// Returns the segments together with the cut list they came from.
#[must_use]
pub fn split_at_points(
    line: &MeasuredPolyline,
    candidates: &[Point],
    snap_tolerance: f64,
    tolerances: &Tolerances,
) -> (Vec<Polyline>, CutList) {
    let cuts = resolve_cuts(line, candidates, snap_tolerance, tolerances);
    let segments = build_segments(line, cuts.positions(), tolerances);
    (segments, cuts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn measured(coords: &[(f64, f64)]) -> MeasuredPolyline {
        MeasuredPolyline::new(&pts(coords), &Tolerances::default())
    }

    fn assert_points_close(got: &[Point], expected: &[Point]) {
        assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
        for (g, e) in got.iter().zip(expected) {
            assert!(
                (g.x - e.x).abs() < 1e-9 && (g.y - e.y).abs() < 1e-9,
                "{got:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn whole_cut_list_reproduces_polyline() {
        let tol = Tolerances::default();
        let line = measured(&[(0.0, 0.0), (1.0, 2.0), (4.0, 2.0), (4.0, -3.0)]);
        let segments = build_segments(&line, &[0.0, line.total_length()], &tol);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].points(), line.points());
    }

    #[test]
    fn corner_split_round_trip() {
        let tol = Tolerances::default();
        let line = measured(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let (segments, cuts) = split_at_points(&line, &[Point::new(10.0, 0.0)], 0.01, &tol);
        assert_eq!(cuts.positions(), &[0.0, 10.0, 20.0]);
        assert_eq!(segments.len(), 2);
        assert_points_close(segments[0].points(), &pts(&[(0.0, 0.0), (10.0, 0.0)]));
        assert_points_close(segments[1].points(), &pts(&[(10.0, 0.0), (10.0, 10.0)]));
    }

    #[test]
    fn mid_segment_split_interpolates_endpoints() {
        let tol = Tolerances::default();
        let line = measured(&[(0.0, 0.0), (10.0, 0.0)]);
        let segments = build_segments(&line, &[0.0, 2.5, 7.5, 10.0], &tol);
        assert_eq!(segments.len(), 3);
        assert_points_close(segments[0].points(), &pts(&[(0.0, 0.0), (2.5, 0.0)]));
        assert_points_close(segments[1].points(), &pts(&[(2.5, 0.0), (7.5, 0.0)]));
        assert_points_close(segments[2].points(), &pts(&[(7.5, 0.0), (10.0, 0.0)]));
    }

    #[test]
    fn interior_vertices_are_copied_verbatim() {
        let tol = Tolerances::default();
        let v1 = Point::new(0.1, 0.7);
        let v2 = Point::new(0.9, 0.3);
        let line =
            MeasuredPolyline::new(&[Point::new(0.0, 0.0), v1, v2, Point::new(2.0, 2.0)], &tol);
        let segments = build_segments(&line, &[0.0, 0.1, line.total_length()], &tol);
        assert_eq!(segments.len(), 2);
        let last = segments[1].points();
        assert_eq!(last[1], v1);
        assert_eq!(last[2], v2);
    }

    #[test]
    fn zero_length_cut_pairs_are_skipped() {
        let tol = Tolerances::default();
        let line = measured(&[(0.0, 0.0), (10.0, 0.0)]);
        let segments = build_segments(&line, &[0.0, 5.0, 5.0, 10.0], &tol);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn degenerate_line_produces_no_segments() {
        let tol = Tolerances::default();
        assert!(build_segments(&measured(&[]), &[0.0, 0.0], &tol).is_empty());
        assert!(build_segments(&measured(&[(3.0, 3.0)]), &[0.0, 0.0], &tol).is_empty());
    }

    #[test]
    fn segment_spans_cover_whole_length() {
        let tol = Tolerances::default();
        let line = measured(&[(0.0, 0.0), (3.0, 4.0), (6.0, 0.0), (6.0, -7.0), (1.0, -7.0)]);
        let candidates = [
            Point::new(1.5, 2.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, -3.5),
            Point::new(2.0, -7.0),
        ];
        let (segments, cuts) = split_at_points(&line, &candidates, 0.01, &tol);
        assert_eq!(segments.len(), cuts.positions().len() - 1);

        let total: f64 = segments
            .iter()
            .map(|s| s.points().windows(2).map(|w| w[0].distance(w[1])).sum::<f64>())
            .sum();
        assert!((total - line.total_length()).abs() < 1e-9);

        // Consecutive segments share their boundary point.
        for pair in segments.windows(2) {
            let end = *pair[0].last().unwrap();
            let start = *pair[1].first().unwrap();
            assert!(end.approx_eq(start, 1e-9));
        }
    }

    #[test]
    fn split_at_points_without_candidates_returns_whole() {
        let tol = Tolerances::default();
        let line = measured(&[(0.0, 0.0), (0.0, 0.0), (5.0, 5.0), (5.0, 10.0)]);
        let (segments, cuts) = split_at_points(&line, &[], 0.01, &tol);
        assert_eq!(cuts.interior().len(), 0);
        assert_eq!(segments, vec![line.polyline().clone()]);
    }
}
