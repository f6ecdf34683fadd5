//! Even resampling: place points at equal arc-length intervals.
//!
//! The sample count is the total length divided by the requested
//! spacing, rounded to the nearest integer. Samples start at the first
//! vertex and stop one interval short of the end, so the exact end
//! point is never emitted.

use crate::arc_length::MeasuredPolyline;
use crate::types::Point;

/// Number of evenly spaced samples for a line of `total` length.
///
/// Returns `None` when the spacing is unusable, the rounded count is
/// below 2, or it does not fit in a `u32`.
fn sample_count(total: f64, spacing: f64) -> Option<u32> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return None;
    }
    let n = (total / spacing).round();
    if n > f64::from(u32::MAX) {
        tracing::warn!(total, spacing, samples = n, "too many samples requested, skipping line");
        return None;
    }
    if !(2.0..).contains(&n) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(n as u32)
}

/// Sample `line` at `n = round(total / spacing)` evenly spaced
/// arc-length positions `i / n * total` for `i` in `0..n`.
///
/// Returns an empty vector when the line has fewer than 2 points, the
/// spacing is not a positive finite number, `n < 2`, or `n`
/// exceeds `u32::MAX` (logged as a warning).
///
/// # Examples
///
/// ```
/// use polysplit_geometry::{MeasuredPolyline, Point, Tolerances};
/// use polysplit_geometry::resample::resample_evenly;
///
/// let line = MeasuredPolyline::new(
///     &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
///     &Tolerances::default(),
/// );
/// assert_eq!(
///     resample_evenly(&line, 5.0),
///     vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)],
/// );
/// ```
#[must_use = "returns the sampled points"]
pub fn resample_evenly(line: &MeasuredPolyline, spacing: f64) -> Vec<Point> {
    if line.points().len() < 2 {
        return Vec::new();
    }
    let total = line.total_length();
    let Some(n) = sample_count(total, spacing) else {
        return Vec::new();
    };

    let n_f = f64::from(n);
    (0..n)
        .filter_map(|i| line.point_at(f64::from(i) / n_f * total))
        .collect()
}

/// Like [`resample_evenly`] but returns the samples as a flat
/// `[x0, y0, x1, y1, ...]` coordinate sequence.
#[must_use = "returns the sampled coordinates"]
pub fn resample_evenly_flat(line: &MeasuredPolyline, spacing: f64) -> Vec<f64> {
    resample_evenly(line, spacing)
        .into_iter()
        .flat_map(|p| [p.x, p.y])
        .collect()
}
