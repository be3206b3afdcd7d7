//! Bounded breadth-first recommendation scoring.
//!
//! # Scoring
//!
//! Starting from a source product, the traversal walks the product graph
//! breadth-first up to `max_depth` hops. Every edge `(node → n, w)` examined
//! while expanding a node at depth `d` adds
//!
//! ```text
//! contribution = w × (popularity(n) / 100) × 1 / (d + 1)
//! ```
//!
//! to `n`'s score. Scores are summed over every edge that reaches `n` during
//! the run, including edges examined after `n` was already enqueued, so
//! products reachable through several paths compound. Each node is expanded
//! at most once; nodes first reached at exactly `max_depth` are scored but
//! never expanded.
//!
//! ## Ranking
//!
//! Candidates go through [`MaxHeap`] ordered by raw score; equal scores rank
//! the lower product id first. The returned score is rounded to four
//! decimal places.

use std::collections::{HashMap, HashSet, VecDeque};

use cobuy_core::{Catalog, Product, ProductId};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::ProductGraph;
use crate::heap::{MaxHeap, Scored};

/// Popularity assumed for graph nodes missing from the catalog.
pub const DEFAULT_POPULARITY: u8 = 50;

/// Traversal settings for [`recommend`].
///
/// Only constructible through [`RecommendConfig::with_max_depth`] or
/// [`Default`], so the depth is never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendConfig {
    max_depth: u32,
}

impl RecommendConfig {
    /// Config with `max_depth` raised to at least 1.
    #[must_use]
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    /// Maximum hop count explored from the source.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self { max_depth: 2 }
    }
}

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub id: ProductId,
    /// Accumulated score rounded to 4 decimal places.
    pub score: f64,
    /// Minimum number of hops from the source.
    pub distance: u32,
    /// Catalog record; `None` for ids that only appear in orders.
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: ProductId,
    score: f64,
    distance: u32,
}

impl Scored for Candidate {
    fn score(&self) -> f64 {
        self.score
    }
}

fn rank_candidates(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    a.score.total_cmp(&b.score).then_with(|| b.id.cmp(&a.id))
}

/// Recommend up to `k` products related to `source`.
///
/// Returns an empty list when `source` is not a graph node. The source itself
/// is never scored or returned.
#[must_use]
#[instrument(skip(graph, catalog), fields(nodes = graph.node_count()))]
pub fn recommend(
    graph: &ProductGraph,
    catalog: &Catalog,
    source: ProductId,
    k: usize,
    config: &RecommendConfig,
) -> Vec<RankedEntry> {
    if !graph.contains(source) {
        debug!("source not in graph");
        return Vec::new();
    }

    let (scores, distances) = accumulate(graph, catalog, source, config.max_depth());

    let mut heap = MaxHeap::with_comparator(rank_candidates);
    heap.extend(scores.into_iter().map(|(id, score)| Candidate {
        id,
        score,
        distance: distances.get(&id).copied().unwrap_or(u32::MAX),
    }));
    debug!(candidates = heap.len(), "scored candidates");

    heap.take_top(k)
        .into_iter()
        .map(|candidate| RankedEntry {
            id: candidate.id,
            score: round4(candidate.score),
            distance: candidate.distance,
            product: catalog.get(candidate.id).cloned(),
        })
        .collect()
}

/// Run the bounded BFS and return per-candidate scores and minimum
/// distances. Both maps have the same key set.
fn accumulate(
    graph: &ProductGraph,
    catalog: &Catalog,
    source: ProductId,
    max_depth: u32,
) -> (HashMap<ProductId, f64>, HashMap<ProductId, u32>) {
    let mut visited: HashSet<ProductId> = HashSet::from([source]);
    let mut frontier: VecDeque<(ProductId, u32)> = VecDeque::from([(source, 0)]);
    let mut scores: HashMap<ProductId, f64> = HashMap::new();
    let mut distances: HashMap<ProductId, u32> = HashMap::new();

    while let Some((id, depth)) = frontier.pop_front() {
        if depth >= max_depth {
            continue;
        }
        let next_depth = depth + 1;

        for (neighbor, weight) in graph.neighbors(id) {
            if neighbor == source {
                continue;
            }

            distances
                .entry(neighbor)
                .and_modify(|d| *d = (*d).min(next_depth))
                .or_insert(next_depth);

            let popularity = catalog
                .get(neighbor)
                .map_or(DEFAULT_POPULARITY, |product| product.popularity);
            *scores.entry(neighbor).or_insert(0.0) += contribution(weight, popularity, next_depth);

            if visited.insert(neighbor) {
                frontier.push_back((neighbor, next_depth));
            }
        }
    }

    (scores, distances)
}

fn contribution(weight: f64, popularity: u8, depth: u32) -> f64 {
    weight * (f64::from(popularity) / 100.0) * (1.0 / f64::from(depth))
}

fn round4(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use cobuy_core::Order;

    fn product(id: u64, category: &str, popularity: u8) -> Product {
        Product {
            id: ProductId(id),
            name: format!("p{id}"),
            category: category.to_string(),
            price: 1.0,
            quantity: 1,
            popularity,
        }
    }

    fn assert_approx_eq(actual: f64, expected: f64) {
        let tolerance = 1e-9;
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual ({actual}) != expected ({expected})"
        );
    }

    #[test]
    fn round4_keeps_four_decimals() {
        assert_approx_eq(round4(4.550_000_1), 4.55);
        assert_approx_eq(round4(1.234_46), 1.2345);
        assert_approx_eq(round4(1.234_44), 1.2344);
        assert_approx_eq(round4(0.0), 0.0);
    }

    #[test]
    fn unknown_source_yields_empty() {
        let catalog: Catalog = [product(1, "A", 50)].into_iter().collect();
        let graph = build_graph(&catalog, &[]);
        assert!(recommend(&graph, &catalog, ProductId(9), 5, &RecommendConfig::default()).is_empty());
    }

    #[test]
    fn isolated_source_yields_empty() {
        let catalog: Catalog = [product(1, "A", 50), product(2, "B", 50)].into_iter().collect();
        let graph = build_graph(&catalog, &[]);
        assert!(recommend(&graph, &catalog, ProductId(1), 5, &RecommendConfig::default()).is_empty());
    }

    #[test]
    fn chain_scores_decay_with_depth() {
        // 1 - 2 - 3, co-purchase only.
        let catalog: Catalog = [product(1, "A", 100), product(2, "B", 50), product(3, "C", 80)]
            .into_iter()
            .collect();
        let graph = build_graph(&catalog, &[Order::from_ids([1, 2]), Order::from_ids([2, 3])]);

        let recs = recommend(&graph, &catalog, ProductId(1), 5, &RecommendConfig::default());
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].id, ProductId(2));
        assert_eq!(recs[0].distance, 1);
        assert_approx_eq(recs[0].score, 1.5); // 3 × 0.5 × 1

        assert_eq!(recs[1].id, ProductId(3));
        assert_eq!(recs[1].distance, 2);
        assert_approx_eq(recs[1].score, 1.2); // 3 × 0.8 × 1/2
    }

    #[test]
    fn scores_compound_over_multiple_edges() {
        // Triangle 1-2-3: node 3 is reached from 1 (depth 1) and again
        // from 2 (depth 2) after it is already enqueued.
        let catalog: Catalog = [product(1, "X", 50), product(2, "Y", 100), product(3, "Z", 100)]
            .into_iter()
            .collect();
        let graph = build_graph(&catalog, &[Order::from_ids([1, 2, 3])]);

        let recs = recommend(&graph, &catalog, ProductId(1), 5, &RecommendConfig::default());
        for entry in &recs {
            assert_eq!(entry.distance, 1);
            // 3 × 1.0 × 1 (direct) + 3 × 1.0 × 1/2 (via the other)
            assert_approx_eq(entry.score, 4.5);
        }
        // Equal scores: lower id first.
        let ids: Vec<u64> = recs.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn nodes_at_max_depth_are_not_expanded() {
        // 1 - 2 - 3 - 4
        let catalog: Catalog = (1..=4).map(|id| product(id, &format!("c{id}"), 100)).collect();
        let graph = build_graph(
            &catalog,
            &[Order::from_ids([1, 2]), Order::from_ids([2, 3]), Order::from_ids([3, 4])],
        );

        let recs = recommend(&graph, &catalog, ProductId(1), 10, &RecommendConfig::with_max_depth(2));
        let ids: Vec<u64> = recs.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn unknown_neighbor_uses_default_popularity() {
        let catalog: Catalog = [product(1, "A", 90)].into_iter().collect();
        let graph = build_graph(&catalog, &[Order::from_ids([1, 77])]);

        let recs = recommend(&graph, &catalog, ProductId(1), 5, &RecommendConfig::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, ProductId(77));
        assert!(recs[0].product.is_none());
        assert_approx_eq(recs[0].score, 1.5); // 3 × 0.5
    }

    #[test]
    fn limit_truncates_results() {
        let catalog: Catalog = (1..=6).map(|id| product(id, "A", 50)).collect();
        let graph = build_graph(&catalog, &[]);
        let recs = recommend(&graph, &catalog, ProductId(1), 3, &RecommendConfig::default());
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn config_depth_never_below_one() {
        assert_eq!(RecommendConfig::with_max_depth(0).max_depth(), 1);
        assert_eq!(RecommendConfig::with_max_depth(3).max_depth(), 3);
        assert_eq!(RecommendConfig::default().max_depth(), 2);
    }

    #[test]
    fn zero_depth_still_scores_direct_neighbors() {
        let catalog: Catalog = [product(1, "A", 100), product(2, "B", 100)].into_iter().collect();
        let graph = build_graph(&catalog, &[Order::from_ids([1, 2])]);
        let recs = recommend(&graph, &catalog, ProductId(1), 5, &RecommendConfig::with_max_depth(0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].distance, 1);
    }
}
