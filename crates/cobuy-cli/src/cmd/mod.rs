pub mod completions;
pub mod lookup;
pub mod neighbors;
pub mod recommend;
pub mod shell;
pub mod stats;

use std::path::Path;

use anyhow::Result;
use cobuy_core::config::{CobuyConfig, RecommendSettings};
use cobuy_core::dataset::load_or_sample;
use cobuy_core::error::CobuyError;
use cobuy_core::lookup as catalog_lookup;
use cobuy_core::{Dataset, Product};
use cobuy_graph::{EdgeWeights, ProductGraph, build_graph_with};
use tracing::debug;

/// Everything a data command needs: the loaded dataset, the graph built
/// from it once, and the recommendation defaults.
pub struct Session {
    pub dataset: Dataset,
    pub graph: ProductGraph,
    pub settings: RecommendSettings,
}

impl Session {
    /// Load the dataset named by `--data`, else `[data].path`, else the
    /// built-in sample, and build its graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset file cannot be loaded.
    pub fn load(data: Option<&Path>, config: &CobuyConfig) -> Result<Self> {
        let path = data.or(config.data.path.as_deref());
        debug!(path = ?path, "loading dataset");
        let dataset = load_or_sample(path)?;
        Ok(Self::from_dataset(dataset, config))
    }

    pub fn from_dataset(dataset: Dataset, config: &CobuyConfig) -> Self {
        let graph = build_graph_with(
            &dataset.catalog,
            &dataset.orders,
            &EdgeWeights::from(&config.graph),
        );
        Self {
            dataset,
            graph,
            settings: config.recommend.clone(),
        }
    }

    /// Resolve an id or name to a catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`CobuyError::ProductNotFound`] when nothing matches.
    pub fn resolve(&self, query: &str) -> Result<&Product, CobuyError> {
        catalog_lookup::resolve(&self.dataset.catalog, query).ok_or_else(|| {
            CobuyError::ProductNotFound {
                query: query.trim().to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobuy_core::ProductId;

    #[test]
    fn sample_session_resolves_by_id_and_name() {
        let session = Session::load(None, &CobuyConfig::default()).unwrap();
        assert_eq!(session.resolve("3").unwrap().name, "Mouse");
        assert_eq!(session.resolve("laptop").unwrap().id, ProductId(1));
        assert_eq!(session.graph.node_count(), 25);
    }

    #[test]
    fn unknown_query_is_product_not_found() {
        let session = Session::load(None, &CobuyConfig::default()).unwrap();
        let err = session.resolve("  Toaster ").unwrap_err();
        assert!(matches!(err, CobuyError::ProductNotFound { ref query } if query == "Toaster"));
    }

    #[test]
    fn graph_weights_follow_config() {
        let mut config = CobuyConfig::default();
        config.graph.category_weight = 0.0;
        let session = Session::load(None, &config).unwrap();
        // Coffee Mug and Water Bottle: one shared order, category ignored.
        let weight = session.graph.weight(ProductId(17), ProductId(18)).unwrap();
        assert!((weight - 3.0).abs() < f64::EPSILON);
    }
}
