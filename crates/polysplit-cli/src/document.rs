//! JSON documents read and written by the CLI.
//!
//! Coordinates travel as rows of numbers (`[x, y, ...]`), one row per
//! vertex, so files exported from other tools can carry Z or M columns
//! that are ignored here.

use serde::{Deserialize, Serialize};

use polysplit_geometry::{
    BatchDiagnostics, BranchGraph, BranchPaths, CoordinateMatrix, GeometryError, Point, Polyline,
};

/// Vertex rows of one polyline or point set.
pub type Rows = Vec<Vec<f64>>;

/// Input of `split` and `sample`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryInput {
    pub polylines: Vec<Rows>,
    /// Split candidates, one list per polyline. Ignored by `sample`.
    #[serde(default)]
    pub split_points: Vec<Rows>,
}

fn rows_to_points(rows: &Rows) -> Result<Vec<Point>, GeometryError> {
    CoordinateMatrix::from_rows(rows)?.to_points()
}

impl GeometryInput {
    /// Polylines as given, not yet normalized.
    pub fn polylines(&self) -> Result<Vec<Polyline>, GeometryError> {
        self.polylines
            .iter()
            .map(|rows| rows_to_points(rows).map(Polyline::new))
            .collect()
    }

    pub fn split_points(&self) -> Result<Vec<Vec<Point>>, GeometryError> {
        self.split_points.iter().map(rows_to_points).collect()
    }
}

fn point_rows(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

/// Output of `split`: the segments of every input polyline.
#[derive(Debug, Serialize)]
pub struct SplitOutput {
    pub segments: Vec<Vec<Vec<[f64; 2]>>>,
    pub diagnostics: BatchDiagnostics,
}

impl SplitOutput {
    pub fn new(segments: &[Vec<Polyline>], diagnostics: BatchDiagnostics) -> Self {
        Self {
            segments: segments
                .iter()
                .map(|line| line.iter().map(|s| point_rows(s.points())).collect())
                .collect(),
            diagnostics,
        }
    }
}

/// Output of `sample`: the sampled points of every input polyline.
#[derive(Debug, Serialize)]
pub struct SampleOutput {
    pub samples: Vec<Vec<[f64; 2]>>,
    pub diagnostics: BatchDiagnostics,
}

impl SampleOutput {
    pub fn new(samples: &[Vec<Point>], diagnostics: BatchDiagnostics) -> Self {
        Self {
            samples: samples.iter().map(|s| point_rows(s)).collect(),
            diagnostics,
        }
    }
}

/// One directed edge of a `route` input.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    #[serde(default = "default_branch_degree")]
    pub branch_degree: u32,
}

const fn default_branch_degree() -> u32 {
    1
}

/// Input of `route`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteInput {
    pub node_count: usize,
    pub start: usize,
    #[serde(default)]
    pub edges: Vec<RouteEdge>,
}

impl RouteInput {
    pub fn graph(&self) -> Result<BranchGraph, GeometryError> {
        let mut graph = BranchGraph::with_nodes(self.node_count);
        for e in &self.edges {
            graph.add_edge(e.from, e.to, e.weight, e.branch_degree)?;
        }
        Ok(graph)
    }
}

/// Output of `route`. Unreachable nodes have a `null` distance.
#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub distances: Vec<Option<f64>>,
    pub branch_factors: Vec<f64>,
}

impl From<BranchPaths> for RouteOutput {
    fn from(paths: BranchPaths) -> Self {
        Self {
            distances: paths
                .distances
                .into_iter()
                .map(|d| d.is_finite().then_some(d))
                .collect(),
            branch_factors: paths.branch_factors,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use polysplit_geometry::diagnostics::Operation;
    use polysplit_geometry::shortest_paths_with_branches;

    use super::*;

    #[test]
    fn geometry_input_ignores_extra_columns() {
        let input: GeometryInput = serde_json::from_str(
            r#"{"polylines": [[[0, 0, 5], [10, 0, 6]]], "split_points": [[[5, 0]]]}"#,
        )
        .unwrap();
        let polylines = input.polylines().unwrap();
        assert_eq!(
            polylines[0].points(),
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
        );
        assert_eq!(input.split_points().unwrap(), vec![vec![Point::new(5.0, 0.0)]]);
    }

    #[test]
    fn split_points_are_optional() {
        let input: GeometryInput = serde_json::from_str(r#"{"polylines": []}"#).unwrap();
        assert!(input.split_points().unwrap().is_empty());
    }

    #[test]
    fn short_rows_are_a_shape_error() {
        let input: GeometryInput =
            serde_json::from_str(r#"{"polylines": [[[0], [1]]]}"#).unwrap();
        assert!(matches!(
            input.polylines(),
            Err(GeometryError::InvalidShape(_))
        ));
    }

    #[test]
    fn ragged_rows_are_a_shape_error() {
        let input: GeometryInput =
            serde_json::from_str(r#"{"polylines": [[[0, 0], [1, 1, 1]]]}"#).unwrap();
        assert!(input.polylines().is_err());
    }

    #[test]
    fn split_output_uses_coordinate_pairs() {
        let segments = vec![vec![Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.5, 2.0),
        ])]];
        let out = SplitOutput::new(&segments, BatchDiagnostics::new(Operation::Split, 1));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["segments"], serde_json::json!([[[[0.0, 0.0], [1.5, 2.0]]]]));
        assert_eq!(json["diagnostics"]["polyline_count"], 1);
    }

    #[test]
    fn route_round_trip() {
        let input: RouteInput = serde_json::from_str(
            r#"{
                "node_count": 4,
                "start": 0,
                "edges": [
                    {"from": 0, "to": 1, "weight": 1, "branch_degree": 3},
                    {"from": 1, "to": 2, "weight": 1}
                ]
            }"#,
        )
        .unwrap();
        let paths = shortest_paths_with_branches(&input.graph().unwrap(), input.start).unwrap();
        let json = serde_json::to_value(RouteOutput::from(paths)).unwrap();
        assert_eq!(json["distances"], serde_json::json!([0.0, 1.0, 2.0, null]));
        assert_eq!(json["branch_factors"], serde_json::json!([1.0, 2.0, 2.0, 1.0]));
    }

    #[test]
    fn route_edge_out_of_range_is_an_error() {
        let input: RouteInput = serde_json::from_str(
            r#"{"node_count": 1, "start": 0, "edges": [{"from": 0, "to": 3, "weight": 1}]}"#,
        )
        .unwrap();
        assert!(matches!(
            input.graph(),
            Err(GeometryError::NodeOutOfRange { node: 3, .. })
        ));
    }
}
