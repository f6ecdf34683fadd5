//! Collection-level entry points: one result per input polyline.
//!
//! Output order always matches input order. With the `parallel` feature
//! the items are processed on the rayon thread pool; the results are the
//! same as the sequential path.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::arc_length::MeasuredPolyline;
use crate::diagnostics::{BatchDiagnostics, Clock, Operation};
use crate::matrix::CoordinateMatrix;
use crate::resample::resample_evenly;
use crate::split::split_at_points;
use crate::types::{GeometryError, Point, Polyline, ProcessConfig};

/// Result of splitting one polyline, with the counts diagnostics need.
#[derive(Debug, Clone, PartialEq)]
struct SplitOutcome {
    segments: Vec<Polyline>,
    degenerate: bool,
    accepted: usize,
    rejected: usize,
}

fn split_one(
    line: &Polyline,
    candidates: Option<&[Point]>,
    config: &ProcessConfig,
) -> SplitOutcome {
    let measured = MeasuredPolyline::new(line.points(), &config.tolerances);
    if measured.points().len() < 2 {
        return SplitOutcome {
            segments: Vec::new(),
            degenerate: true,
            accepted: 0,
            rejected: 0,
        };
    }
    match candidates {
        None | Some([]) => SplitOutcome {
            segments: vec![measured.into_polyline()],
            degenerate: false,
            accepted: 0,
            rejected: 0,
        },
        Some(candidates) => {
            let (segments, cuts) = split_at_points(
                &measured,
                candidates,
                config.snap_tolerance,
                &config.tolerances,
            );
            SplitOutcome {
                segments,
                degenerate: false,
                accepted: cuts.accepted(),
                rejected: cuts.rejected(),
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn split_each(
    polylines: &[Polyline],
    candidates: &[Vec<Point>],
    config: &ProcessConfig,
) -> Vec<SplitOutcome> {
    polylines
        .par_iter()
        .enumerate()
        .map(|(i, line)| split_one(line, candidates.get(i).map(Vec::as_slice), config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn split_each(
    polylines: &[Polyline],
    candidates: &[Vec<Point>],
    config: &ProcessConfig,
) -> Vec<SplitOutcome> {
    polylines
        .iter()
        .enumerate()
        .map(|(i, line)| split_one(line, candidates.get(i).map(Vec::as_slice), config))
        .collect()
}

fn sample_one(line: &Polyline, config: &ProcessConfig) -> Vec<Point> {
    let measured = MeasuredPolyline::new(line.points(), &config.tolerances);
    resample_evenly(&measured, config.sample_spacing)
}

#[cfg(feature = "parallel")]
fn sample_each(polylines: &[Polyline], config: &ProcessConfig) -> Vec<Vec<Point>> {
    polylines
        .par_iter()
        .map(|line| sample_one(line, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn sample_each(polylines: &[Polyline], config: &ProcessConfig) -> Vec<Vec<Point>> {
    polylines
        .iter()
        .map(|line| sample_one(line, config))
        .collect()
}

/// Split every polyline at its own list of candidate points.
///
/// `candidates[i]` belongs to `polylines[i]`. For each input:
///
/// - fewer than 2 distinct points: an empty entry;
/// - no candidate list at index `i` (shorter `candidates`), or an empty
///   one: the normalized polyline, unsplit;
/// - otherwise the segments produced by
///   [`split_at_points`] with `config.snap_tolerance`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`] if `config` fails
/// [`ProcessConfig::validate`].
///
/// # Examples
///
/// ```
/// use polysplit_geometry::{Point, Polyline, ProcessConfig};
/// use polysplit_geometry::batch::split_all;
///
/// # fn main() -> Result<(), polysplit_geometry::GeometryError> {
/// let line = Polyline::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
/// ]);
/// let out = split_all(&[line], &[vec![Point::new(10.0, 0.0)]], &ProcessConfig::default())?;
/// assert_eq!(out[0].len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn split_all(
    polylines: &[Polyline],
    candidates: &[Vec<Point>],
    config: &ProcessConfig,
) -> Result<Vec<Vec<Polyline>>, GeometryError> {
    config.validate()?;
    Ok(split_each(polylines, candidates, config)
        .into_iter()
        .map(|o| o.segments)
        .collect())
}

/// [`split_all`] with timing and counts.
///
/// # Errors
///
/// Fails like [`split_all`].
pub fn split_all_with_diagnostics<C: Clock>(
    polylines: &[Polyline],
    candidates: &[Vec<Point>],
    config: &ProcessConfig,
    clock: &C,
) -> Result<(Vec<Vec<Polyline>>, BatchDiagnostics), GeometryError> {
    config.validate()?;
    let start = clock.now();
    let outcomes = split_each(polylines, candidates, config);

    let mut diag = BatchDiagnostics::new(Operation::Split, polylines.len());
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        diag.degenerate_count += usize::from(outcome.degenerate);
        diag.candidates_accepted += outcome.accepted;
        diag.candidates_rejected += outcome.rejected;
        diag.output_items += outcome.segments.len();
        diag.output_points += outcome.segments.iter().map(Polyline::len).sum::<usize>();
        results.push(outcome.segments);
    }
    diag.duration = clock.elapsed(&start);

    tracing::debug!(
        polylines = diag.polyline_count,
        degenerate = diag.degenerate_count,
        accepted = diag.candidates_accepted,
        rejected = diag.candidates_rejected,
        segments = diag.output_items,
        "split batch done",
    );
    Ok((results, diag))
}

/// Split polylines given as coordinate matrices.
///
/// Each matrix holds one vertex per row (`x`, `y`, then ignored
/// columns). Segments come back as `n x 2` matrices.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidShape`] if any input matrix has rows
/// but fewer than 2 columns, and fails like [`split_all`] otherwise.
pub fn split_matrices(
    lines: &[CoordinateMatrix],
    split_points: &[CoordinateMatrix],
    config: &ProcessConfig,
) -> Result<Vec<Vec<CoordinateMatrix>>, GeometryError> {
    let polylines = lines
        .iter()
        .map(|m| m.to_points().map(Polyline::new))
        .collect::<Result<Vec<_>, _>>()?;
    let candidates = split_points
        .iter()
        .map(CoordinateMatrix::to_points)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(split_all(&polylines, &candidates, config)?
        .iter()
        .map(|segments| segments.iter().map(CoordinateMatrix::from).collect())
        .collect())
}

/// Resample every polyline at `config.sample_spacing`.
///
/// Inputs too short for two samples yield an empty entry.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`] if `config` fails
/// [`ProcessConfig::validate`].
pub fn sample_all(
    polylines: &[Polyline],
    config: &ProcessConfig,
) -> Result<Vec<Vec<Point>>, GeometryError> {
    config.validate()?;
    Ok(sample_each(polylines, config))
}

/// [`sample_all`] with timing and counts.
///
/// # Errors
///
/// Fails like [`sample_all`].
pub fn sample_all_with_diagnostics<C: Clock>(
    polylines: &[Polyline],
    config: &ProcessConfig,
    clock: &C,
) -> Result<(Vec<Vec<Point>>, BatchDiagnostics), GeometryError> {
    config.validate()?;
    let start = clock.now();
    let samples = sample_each(polylines, config);

    let mut diag = BatchDiagnostics::new(Operation::Sample, polylines.len());
    diag.degenerate_count = polylines
        .iter()
        .filter(|line| Polyline::normalized(line.points(), &config.tolerances).is_degenerate())
        .count();
    diag.output_points = samples.iter().map(Vec::len).sum();
    diag.output_items = diag.output_points;
    diag.duration = clock.elapsed(&start);

    tracing::debug!(
        polylines = diag.polyline_count,
        degenerate = diag.degenerate_count,
        samples = diag.output_points,
        spacing = config.sample_spacing,
        "sample batch done",
    );
    Ok((samples, diag))
}

/// Resample polylines given as coordinate matrices; each result is an
/// `n x 2` matrix.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidShape`] for malformed matrices and
/// fails like [`sample_all`] otherwise.
pub fn sample_matrices(
    lines: &[CoordinateMatrix],
    config: &ProcessConfig,
) -> Result<Vec<CoordinateMatrix>, GeometryError> {
    let polylines = lines
        .iter()
        .map(|m| m.to_points().map(Polyline::new))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sample_all(&polylines, config)?
        .iter()
        .map(|points| CoordinateMatrix::from_points(points))
        .collect())
}
