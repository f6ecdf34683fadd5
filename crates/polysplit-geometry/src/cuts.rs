//! Cut-position resolution: snap candidate split points onto a polyline.
//!
//! Each candidate is projected onto the polyline. Candidates within the
//! snap tolerance contribute their arc-length position; the rest are
//! discarded as too far from the curve. Accepted positions are sorted,
//! deduplicated, and framed by `0` and the total length.

use serde::{Deserialize, Serialize};

use crate::arc_length::MeasuredPolyline;
use crate::project::project_point_onto_polyline;
use crate::types::{Point, Tolerances};

/// Sorted arc-length positions at which to split a polyline.
///
/// Always starts with `0` and ends with the total length, even when no
/// candidate was accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutList {
    positions: Vec<f64>,
    accepted: usize,
    rejected: usize,
}

impl CutList {
    /// The trivial cut list `[0, total]` (no split).
    #[must_use]
    pub fn whole(total: f64) -> Self {
        Self {
            positions: vec![0.0, total],
            accepted: 0,
            rejected: 0,
        }
    }

    /// All cut positions, first `0`, last the total length.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Cut positions strictly between the ends.
    #[must_use]
    pub fn interior(&self) -> &[f64] {
        let n = self.positions.len();
        if n <= 2 {
            &[]
        } else {
            &self.positions[1..n - 1]
        }
    }

    /// Number of candidates that landed within the snap tolerance.
    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of candidates discarded as too far from the polyline.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected
    }
}

/// Resolve `candidates` into a sorted cut list along `line`.
///
/// A candidate is accepted when its projection onto `line` is at most
/// `snap_tolerance` away. Accepted positions are clamped into
/// `[0, total]`, sorted, and merged when adjacent values differ by no
/// more than [`Tolerances::cut_dedup`]. Positions within
/// [`Tolerances::span`] of either end are dropped, since the ends are
/// always present.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::{MeasuredPolyline, Point, Tolerances};
/// use polysplit_geometry::cuts::resolve_cuts;
///
/// let tol = Tolerances::default();
/// let line = MeasuredPolyline::new(
///     &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
///     &tol,
/// );
/// let cuts = resolve_cuts(&line, &[Point::new(10.0, 0.0)], 0.01, &tol);
/// assert_eq!(cuts.positions(), &[0.0, 10.0, 20.0]);
/// ```
#[must_use]
pub fn resolve_cuts(
    line: &MeasuredPolyline,
    candidates: &[Point],
    snap_tolerance: f64,
    tolerances: &Tolerances,
) -> CutList {
    let total = line.total_length();

    let mut accepted: Vec<f64> = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        let proj = project_point_onto_polyline(line, candidate);
        if proj.distance <= snap_tolerance {
            accepted.push(proj.position.clamp(0.0, total));
        } else {
            tracing::trace!(
                x = candidate.x,
                y = candidate.y,
                distance = proj.distance,
                snap_tolerance,
                "split candidate too far from polyline",
            );
        }
    }
    let accepted_count = accepted.len();
    let rejected_count = candidates.len() - accepted_count;

    accepted.sort_by(f64::total_cmp);
    let unique = dedup_sorted(&accepted, tolerances.cut_dedup);

    let mut positions = Vec::with_capacity(unique.len() + 2);
    positions.push(0.0);
    positions.extend(
        unique
            .into_iter()
            .filter(|&d| tolerances.span < d && d < total - tolerances.span),
    );
    positions.push(total);

    CutList {
        positions,
        accepted: accepted_count,
        rejected: rejected_count,
    }
}

/// Adjacent-pass deduplication of sorted values.
///
/// A value is kept when it differs from the last kept value by more than
/// `eps`, so chains of close values collapse onto their first member.
fn dedup_sorted(sorted: &[f64], eps: f64) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(sorted.len());
    for &v in sorted {
        match out.last() {
            Some(&last) if (last - v).abs() <= eps => {}
            _ => out.push(v),
        }
    }
    out
}
