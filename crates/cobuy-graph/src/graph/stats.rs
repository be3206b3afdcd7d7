//! Summary statistics for the product graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Products in the graph, including order-only ids that
//!   form a co-purchase pair.
//! - **edge_count**: Weighted undirected pairs.
//! - **density**: `2 * edge_count / (node_count * (node_count - 1))`. Zero for
//!   graphs with fewer than two nodes.
//! - **component_count**: Connected components. Each isolated product counts
//!   as its own component.
//! - **isolated_node_count**: Products with no edges; they can never receive
//!   or produce recommendations.
//! - **max_degree**: Largest neighbor count of any product.
//! - **total_weight**: Sum of all edge weights.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::ProductGraph;

/// Summary statistics for a [`ProductGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    pub total_weight: f64,
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics from a [`ProductGraph`].
    #[must_use]
    pub fn from_graph(graph: &ProductGraph) -> Self {
        let inner = graph.inner();
        let degrees: Vec<usize> = inner
            .node_indices()
            .map(|idx| inner.neighbors(idx).count())
            .collect();

        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density: compute_density(graph.node_count(), graph.edge_count()),
            component_count: connected_components(inner),
            isolated_node_count: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            total_weight: inner.edge_weights().sum(),
            content_hash: graph.content_hash().to_string(),
        }
    }

    /// Return `true` if the graph has no edges at all.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
