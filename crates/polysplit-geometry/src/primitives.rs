//! Point and polyline primitives: distance, duplicate removal, and
//! cumulative arc length.

use crate::types::Point;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Remove consecutive near-duplicate points.
///
/// A point is dropped when both of its coordinates are within `eps` of
/// the last point kept. The first point is always kept, so only
/// consecutive runs collapse; a path that returns to an earlier vertex
/// keeps both visits.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::Point;
/// use polysplit_geometry::primitives::normalize;
///
/// let raw = [Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
/// assert_eq!(normalize(&raw, 1e-12), vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
/// ```
#[must_use = "returns the deduplicated points"]
pub fn normalize(points: &[Point], eps: f64) -> Vec<Point> {
    let mut result: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        match result.last() {
            Some(&last) if last.approx_eq(p, eps) => {}
            _ => result.push(p),
        }
    }
    result
}

/// Cumulative distance from the first point to every vertex.
///
/// The output has one entry per point and starts at 0. Inputs with
/// fewer than 2 points yield a table of zeros of matching size.
#[must_use]
pub fn cumulative_lengths(points: &[Point]) -> Vec<f64> {
    let mut cum = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, &p) in points.iter().enumerate() {
        if i > 0 {
            total += distance(points[i - 1], p);
        }
        cum.push(total);
    }
    cum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance(Point::new(1.0, 1.0), Point::new(4.0, 5.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_empty() {
        assert!(normalize(&[], 1e-12).is_empty());
    }

    #[test]
    fn normalize_single_point() {
        assert_eq!(normalize(&pts(&[(2.0, 3.0)]), 1e-12), pts(&[(2.0, 3.0)]));
    }

    #[test]
    fn normalize_collapses_consecutive_duplicates() {
        let raw = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(normalize(&raw, 1e-12), pts(&[(0.0, 0.0), (1.0, 0.0)]));
    }

    #[test]
    fn normalize_collapses_near_duplicates_within_eps() {
        let raw = pts(&[(0.0, 0.0), (5e-13, -5e-13), (1.0, 0.0)]);
        let out = normalize(&raw, 1e-12);
        assert_eq!(out.len(), 2);
        // The first of a run is the one kept.
        assert_eq!(out[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn normalize_keeps_points_differing_in_one_axis() {
        let raw = pts(&[(0.0, 0.0), (0.0, 1e-6)]);
        assert_eq!(normalize(&raw, 1e-12).len(), 2);
    }

    #[test]
    fn normalize_keeps_non_consecutive_repeats() {
        let raw = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(normalize(&raw, 1e-12).len(), 3);
    }

    #[test]
    fn normalize_compares_against_last_kept_point() {
        // Drift of 0.6e-12 per step: each step is within eps of its
        // predecessor, but the comparison is against the last kept point.
        let raw = pts(&[(0.0, 0.0), (0.6e-12, 0.0), (1.2e-12, 0.0)]);
        assert_eq!(normalize(&raw, 1e-12).len(), 2);
    }

    #[test]
    fn cumulative_lengths_empty_and_single() {
        assert!(cumulative_lengths(&[]).is_empty());
        assert_eq!(cumulative_lengths(&pts(&[(4.0, 4.0)])), vec![0.0]);
    }

    #[test]
    fn cumulative_lengths_l_shape() {
        let cum = cumulative_lengths(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
        assert_eq!(cum.len(), 3);
        assert!(cum[0].abs() < f64::EPSILON);
        assert!((cum[1] - 10.0).abs() < 1e-12);
        assert!((cum[2] - 20.0).abs() < 1e-12);
    }

    #[test]
    fn cumulative_lengths_are_monotone() {
        let cum = cumulative_lengths(&pts(&[
            (0.0, 0.0),
            (3.0, 4.0),
            (3.0, 4.0),
            (-2.0, 1.0),
            (7.5, -3.25),
        ]));
        assert!(cum.windows(2).all(|w| w[0] <= w[1]));
        assert!(cum[0].abs() < f64::EPSILON);
    }
}
