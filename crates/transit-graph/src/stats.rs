//! Summary statistics for a transit graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: stops and links in the graph.
//! - **density**: ratio of actual links to possible links for a simple
//!   undirected graph: `2 * edge_count / (node_count * (node_count - 1))`.
//!   Zero for graphs with fewer than two stops.
//! - **component_count**: connected components. A value above 1 means the
//!   network has stops that cannot reach each other at all, which shows up
//!   later as missing entries in all-pairs distance tables.
//! - **isolated_stop_count**: stops with no links.
//! - **max_degree**: highest number of links on any single stop.

use petgraph::algo::connected_components;
use petgraph::visit::IntoNodeIdentifiers;

use crate::graph::TransitGraph;

/// Summary statistics computed from a [`TransitGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    /// Number of stops.
    pub node_count: usize,
    /// Number of links.
    pub edge_count: usize,
    /// `2 * edge_count / (node_count * (node_count - 1))`, 0.0 below 2 stops.
    pub density: f64,
    /// Number of connected components.
    pub component_count: usize,
    /// Stops with no links at all.
    pub isolated_stop_count: usize,
    /// Highest degree over all stops.
    pub max_degree: usize,
}

impl GraphStats {
    /// Compute statistics for a graph.
    #[must_use]
    pub fn from_graph(g: &TransitGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let component_count = connected_components(g.inner());

        let isolated_stop_count = g
            .inner()
            .node_identifiers()
            .filter(|&idx| g.links(idx).next().is_none())
            .count();

        let max_degree = g
            .inner()
            .node_identifiers()
            .map(|idx| g.links(idx).count())
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            density: density(node_count, edge_count),
            component_count,
            isolated_stop_count,
            max_degree,
        }
    }
}

/// Density of a simple undirected graph. Defined as 0.0 below two nodes.
fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = node_count as f64;
    #[allow(clippy::cast_precision_loss)]
    let e = edge_count as f64;
    (2.0 * e) / (n * (n - 1.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
