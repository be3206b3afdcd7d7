#![forbid(unsafe_code)]
//! cobuy-graph library.
//!
//! Builds the weighted co-purchase/category graph once, then answers
//! independent recommendation queries against it.
//!
//! # Conventions
//!
//! - **Errors**: The graph, traversal and heap are infallible; missing data
//!   resolves to empty values (`Vec::new()`, `None`).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod graph;
pub mod heap;
pub mod recommend;

pub use graph::{EdgeWeights, GraphStats, ProductGraph, build_graph, build_graph_with};
pub use heap::{MaxHeap, Scored};
pub use recommend::{DEFAULT_POPULARITY, RankedEntry, RecommendConfig, recommend};
