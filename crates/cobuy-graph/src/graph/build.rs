//! Weighted product graph construction from a catalog and order history.
//!
//! # Edge Weights
//!
//! Two independent rules contribute to the weight of an unordered product
//! pair, and contributions are summed:
//!
//! - **Co-purchase**: every order adds `co_purchase` (default 3.0) for each
//!   pair of positions holding distinct ids.
//! - **Category**: every pair of distinct catalog products with exactly the
//!   same category label adds `category` (default 1.0), once, regardless of
//!   purchase history.
//!
//! ## Symmetry
//!
//! Each pair is stored as a single undirected petgraph edge, so
//! `weight(a, b) == weight(b, a)` holds by construction.
//!
//! ## Unknown Ids
//!
//! An id that appears in orders but not in the catalog becomes a node only
//! once it forms a co-purchase pair with a different id. An order holding a
//! single unknown id adds nothing. Scoring substitutes a default popularity
//! for these nodes.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use cobuy_core::config::GraphSettings;
use cobuy_core::{Catalog, Order, Product, ProductId};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{info, instrument};

// ---------------------------------------------------------------------------
// EdgeWeights
// ---------------------------------------------------------------------------

/// Per-rule weight contributions used while building the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeWeights {
    /// Added per order in which a pair co-occurs.
    pub co_purchase: f64,
    /// Added once per pair sharing a category.
    pub category: f64,
}

impl Default for EdgeWeights {
    fn default() -> Self {
        Self {
            co_purchase: 3.0,
            category: 1.0,
        }
    }
}

impl From<&GraphSettings> for EdgeWeights {
    fn from(settings: &GraphSettings) -> Self {
        Self {
            co_purchase: settings.co_purchase_weight,
            category: settings.category_weight,
        }
    }
}

// ---------------------------------------------------------------------------
// ProductGraph
// ---------------------------------------------------------------------------

/// Immutable weighted adjacency structure over product ids.
///
/// Nodes are product ids; an edge carries the accumulated weight of its
/// pair. Every catalog product has a node, even without edges. There are no
/// self-loops and no zero-weight edges.
#[derive(Debug, Clone)]
pub struct ProductGraph {
    graph: UnGraph<ProductId, f64>,
    node_map: HashMap<ProductId, NodeIndex>,
    content_hash: String,
}

impl ProductGraph {
    /// Return `true` if `id` is a node of the graph.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Neighbors of `id` with their edge weights. Empty for unknown ids.
    pub fn neighbors(&self, id: ProductId) -> impl Iterator<Item = (ProductId, f64)> + '_ {
        self.node_map.get(&id).copied().into_iter().flat_map(move |idx| {
            self.graph.edges(idx).map(move |edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other], *edge.weight())
            })
        })
    }

    /// Weight of the edge between `a` and `b`, if one exists.
    #[must_use]
    pub fn weight(&self, a: ProductId, b: ProductId) -> Option<f64> {
        let ia = self.node_map.get(&a)?;
        let ib = self.node_map.get(&b)?;
        self.graph
            .find_edge(*ia, *ib)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
    }

    /// Number of distinct neighbors of `id`.
    #[must_use]
    pub fn degree(&self, id: ProductId) -> usize {
        self.neighbors(id).count()
    }

    /// Return the number of nodes (products) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of undirected edges (weighted pairs) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All node ids, in node insertion order (catalog ids first, ascending).
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.graph.node_weights().copied()
    }

    /// Underlying petgraph structure, for read-only graph algorithms.
    #[must_use]
    pub const fn inner(&self) -> &UnGraph<ProductId, f64> {
        &self.graph
    }

    /// BLAKE3 hash of the sorted weighted edge list.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build the product graph with the default edge weights (3.0 / 1.0).
#[must_use]
pub fn build_graph(catalog: &Catalog, orders: &[Order]) -> ProductGraph {
    build_graph_with(catalog, orders, &EdgeWeights::default())
}

/// Build the product graph with explicit per-rule weights.
///
/// Cost is `O(sum(order_len^2) + catalog_len^2)`.
#[must_use]
#[instrument(skip_all, fields(products = catalog.len(), orders = orders.len()))]
pub fn build_graph_with(catalog: &Catalog, orders: &[Order], weights: &EdgeWeights) -> ProductGraph {
    let mut builder = Builder::with_catalog(catalog);

    for order in orders {
        let ids = order.ids();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                builder.increment(a, b, weights.co_purchase);
            }
        }
    }

    let products: Vec<&Product> = catalog.iter().collect();
    for (i, a) in products.iter().enumerate() {
        for b in &products[i + 1..] {
            if a.category == b.category {
                builder.increment(a.id, b.id, weights.category);
            }
        }
    }

    let graph = builder.finish();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        hash = %graph.content_hash,
        "product graph built"
    );
    graph
}

struct Builder {
    graph: UnGraph<ProductId, f64>,
    node_map: HashMap<ProductId, NodeIndex>,
}

impl Builder {
    fn with_catalog(catalog: &Catalog) -> Self {
        let mut graph = UnGraph::<ProductId, f64>::with_capacity(catalog.len(), 0);
        let mut node_map = HashMap::with_capacity(catalog.len());
        for id in catalog.ids() {
            node_map.insert(id, graph.add_node(id));
        }
        Self { graph, node_map }
    }

    fn node(&mut self, id: ProductId) -> NodeIndex {
        let graph = &mut self.graph;
        *self.node_map.entry(id).or_insert_with(|| graph.add_node(id))
    }

    fn increment(&mut self, a: ProductId, b: ProductId, weight: f64) {
        if a == b || weight.is_nan() || weight <= 0.0 {
            return;
        }
        let ia = self.node(a);
        let ib = self.node(b);
        match self.graph.find_edge(ia, ib) {
            Some(edge) => self.graph[edge] += weight,
            None => {
                self.graph.add_edge(ia, ib, weight);
            }
        }
    }

    fn finish(self) -> ProductGraph {
        let content_hash = compute_edge_hash(&self.graph);
        ProductGraph {
            graph: self.graph,
            node_map: self.node_map,
            content_hash,
        }
    }
}

/// Compute a BLAKE3 hash of the sorted `(low, high, weight)` edge list.
fn compute_edge_hash(graph: &UnGraph<ProductId, f64>) -> String {
    let mut edges: Vec<(ProductId, ProductId, f64)> = graph
        .edge_references()
        .map(|edge| {
            let a = graph[edge.source()];
            let b = graph[edge.target()];
            (a.min(b), a.max(b), *edge.weight())
        })
        .collect();
    edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));

    let mut hasher = blake3::Hasher::new();
    for (a, b, weight) in edges {
        hasher.update(&a.0.to_le_bytes());
        hasher.update(&b.0.to_le_bytes());
        hasher.update(&weight.to_bits().to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
