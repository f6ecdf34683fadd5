//! polysplit-geometry: Pure polyline geometry (sans-IO).
//!
//! Measures, projects, splits, and resamples 2D polylines by arc length:
//! normalize -> arc-length table -> {projection, resampling}, or
//! normalize -> arc-length table -> cut resolution -> segment building.
//!
//! Degenerate geometry (empty or single-point polylines, zero-length
//! segments) never fails; every operation has a defined fallback.
//! Errors are reserved for malformed input shapes and invalid
//! configuration. All I/O lives in `polysplit-cli`.

pub mod arc_length;
pub mod batch;
pub mod branch_graph;
pub mod cuts;
pub mod diagnostics;
pub mod matrix;
pub mod primitives;
pub mod project;
pub mod resample;
pub mod split;
pub mod types;

pub use arc_length::{ArcLengthTable, MeasuredPolyline};
pub use branch_graph::{BranchEdge, BranchGraph, BranchPaths, shortest_paths_with_branches};
pub use cuts::CutList;
pub use diagnostics::{BatchDiagnostics, Clock, NoClock};
pub use matrix::CoordinateMatrix;
pub use types::{
    BoundingBox, GeometryError, Point, Polyline, ProcessConfig, Tolerances, points_bounding_box,
    polyline_bounding_box,
};

/// Split a single polyline at the candidate points within
/// `config.snap_tolerance` of it.
///
/// Same rules as one entry of [`batch::split_all`]: a degenerate input
/// yields no segments, and no candidates yield the normalized polyline
/// unsplit.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`] if `config` is invalid.
pub fn split(
    points: &[Point],
    candidates: &[Point],
    config: &ProcessConfig,
) -> Result<Vec<Polyline>, GeometryError> {
    config.validate()?;
    let line = MeasuredPolyline::new(points, &config.tolerances);
    if line.points().len() < 2 {
        return Ok(Vec::new());
    }
    if candidates.is_empty() {
        return Ok(vec![line.into_polyline()]);
    }
    let (segments, _) =
        split::split_at_points(&line, candidates, config.snap_tolerance, &config.tolerances);
    Ok(segments)
}

/// Resample a single polyline at `config.sample_spacing`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`] if `config` is invalid.
pub fn sample(points: &[Point], config: &ProcessConfig) -> Result<Vec<Point>, GeometryError> {
    config.validate()?;
    let line = MeasuredPolyline::new(points, &config.tolerances);
    Ok(resample::resample_evenly(&line, config.sample_spacing))
}
