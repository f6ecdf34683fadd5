//! Shortest paths that carry a multiplicative branch factor.
//!
//! Every edge has a non-negative weight and a *branch degree*: the number
//! of ways the network forks at that edge. Alongside the usual Dijkstra
//! distance, each node accumulates
//! `factor[v] = factor[u] * max(1, degree(u -> v) - 1)` along its
//! shortest-path tree edge, which estimates how many parallel
//! alternatives lead to it.
//!
//! The graph lives in a [`petgraph`] `DiGraph`. The traversal is written
//! out rather than delegated to `petgraph::algo::dijkstra` because the
//! branch factor has to be updated on the same relaxation step as the
//! distance.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::types::GeometryError;

/// Payload stored on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BranchEdge {
    /// Target node index.
    pub to: usize,
    /// Non-negative traversal cost.
    pub weight: f64,
    /// Branching degree at this edge.
    pub branch_degree: u32,
}

/// Directed graph with weighted, branch-annotated edges.
#[derive(Debug, Clone, Default)]
pub struct BranchGraph {
    graph: DiGraph<(), (f64, u32), usize>,
}

impl BranchGraph {
    /// Create a graph with `node_count` nodes and no edges.
    #[must_use]
    pub fn with_nodes(node_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Build a graph from per-node outgoing edge lists.
    ///
    /// Node `i` has the out-edges listed in `adjacency[i]`; the node
    /// count is `adjacency.len()`.
    ///
    /// # Errors
    ///
    /// Fails like [`add_edge`](Self::add_edge) on the first bad edge.
    pub fn from_adjacency(adjacency: &[Vec<BranchEdge>]) -> Result<Self, GeometryError> {
        let mut graph = Self::with_nodes(adjacency.len());
        for (from, edges) in adjacency.iter().enumerate() {
            for edge in edges {
                graph.add_edge(from, edge.to, edge.weight, edge.branch_degree)?;
            }
        }
        Ok(graph)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a directed edge `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NodeOutOfRange`] if either endpoint is
    /// not a node of the graph, and [`GeometryError::InvalidEdgeWeight`]
    /// if `weight` is negative or not finite.
    pub fn add_edge(
        &mut self,
        from: usize,
        to: usize,
        weight: f64,
        branch_degree: u32,
    ) -> Result<(), GeometryError> {
        let a = self.node(from)?;
        let b = self.node(to)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(GeometryError::InvalidEdgeWeight { from, to, weight });
        }
        self.graph.add_edge(a, b, (weight, branch_degree));
        Ok(())
    }

    fn node(&self, index: usize) -> Result<NodeIndex<usize>, GeometryError> {
        if index < self.graph.node_count() {
            Ok(NodeIndex::new(index))
        } else {
            Err(GeometryError::NodeOutOfRange {
                node: index,
                node_count: self.graph.node_count(),
            })
        }
    }
}

/// Per-node results of [`shortest_paths_with_branches`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPaths {
    /// Shortest distance from the start; `f64::INFINITY` when unreachable.
    pub distances: Vec<f64>,
    /// Accumulated branch factor; `1.0` when unreachable.
    pub branch_factors: Vec<f64>,
}

/// Priority-queue entry ordered so that [`BinaryHeap`] pops the smallest
/// `(distance, node)` first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    distance: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Factor contributed by an edge of the given branch degree.
fn edge_factor(branch_degree: u32) -> f64 {
    f64::from(branch_degree.saturating_sub(1).max(1))
}

/// Single-source shortest paths from `start`, propagating branch factors.
///
/// Uses a min-priority queue keyed on `(distance, node)` with lazy
/// deletion: improved nodes are pushed again and stale entries are
/// skipped when popped. Only a strictly shorter path replaces a node's
/// distance and factor, so among equal-length paths the first one
/// settled wins. A node's out-edges are relaxed in the order they were
/// added, so of two equal parallel edges the first-added one counts.
///
/// # Errors
///
/// Returns [`GeometryError::NodeOutOfRange`] if `start` is not a node.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::branch_graph::{BranchGraph, shortest_paths_with_branches};
///
/// # fn main() -> Result<(), polysplit_geometry::GeometryError> {
/// let mut graph = BranchGraph::with_nodes(3);
/// graph.add_edge(0, 1, 1.0, 3)?;
/// graph.add_edge(1, 2, 1.0, 1)?;
/// let paths = shortest_paths_with_branches(&graph, 0)?;
/// assert_eq!(paths.distances, vec![0.0, 1.0, 2.0]);
/// assert_eq!(paths.branch_factors, vec![1.0, 2.0, 2.0]);
/// # Ok(())
/// # }
/// ```
pub fn shortest_paths_with_branches(
    graph: &BranchGraph,
    start: usize,
) -> Result<BranchPaths, GeometryError> {
    let start_ix = graph.node(start)?;
    let n = graph.node_count();

    let mut distances = vec![f64::INFINITY; n];
    let mut branch_factors = vec![1.0; n];
    distances[start] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(State {
        distance: 0.0,
        node: start_ix.index(),
    });

    while let Some(State { distance, node: u }) = heap.pop() {
        if distances[u] < distance {
            continue;
        }
        // petgraph yields out-edges newest first; relax in insertion order.
        let mut out: Vec<_> = graph.graph.edges(NodeIndex::new(u)).collect();
        out.sort_unstable_by_key(|e| e.id());
        for edge in out {
            let v = edge.target().index();
            let (weight, degree) = *edge.weight();
            let candidate = distances[u] + weight;
            if candidate < distances[v] {
                distances[v] = candidate;
                branch_factors[v] = branch_factors[u] * edge_factor(degree);
                heap.push(State {
                    distance: candidate,
                    node: v,
                });
            }
        }
    }

    tracing::debug!(
        nodes = n,
        edges = graph.edge_count(),
        reachable = distances.iter().filter(|d| d.is_finite()).count(),
        "branch shortest paths done",
    );

    Ok(BranchPaths {
        distances,
        branch_factors,
    })
}
