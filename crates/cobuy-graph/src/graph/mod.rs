//! Product graph module.
//!
//! # Overview
//!
//! This module turns a catalog and its order history into an immutable,
//! undirected, weighted petgraph graph. The graph is built once at startup
//! and then shared read-only by every recommendation query.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog + Vec<Order>
//!        ↓  build::build_graph()
//! ProductGraph (UnGraph<ProductId, f64>, one edge per weighted pair)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, components, isolated products, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use cobuy_core::Dataset;
//! use cobuy_graph::graph::{build_graph, GraphStats};
//!
//! let dataset = Dataset::sample()?;
//! let graph = build_graph(&dataset.catalog, &dataset.orders);
//! let stats = GraphStats::from_graph(&graph);
//!
//! println!("nodes={} edges={} density={:.3}",
//!     stats.node_count, stats.edge_count, stats.density);
//! ```

pub mod build;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{EdgeWeights, ProductGraph, build_graph, build_graph_with};
pub use stats::GraphStats;
