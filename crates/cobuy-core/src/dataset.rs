//! Catalog and order-history supply.
//!
//! A dataset is a product list plus a list of historical orders. It is read
//! once at startup from a TOML or JSON file, or from the sample dataset that
//! ships with the crate.
//!
//! ```toml
//! orders = [[1, 3, 4, 6], [2, 3, 7]]
//!
//! [[products]]
//! id = 1
//! name = "Laptop"
//! category = "Electronics"
//! price = 1200.0
//! quantity = 8
//! popularity = 95
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::CobuyError;
use crate::model::{Catalog, Order, Product};

const SAMPLE_TOML: &str = include_str!("../data/sample.toml");

/// Highest accepted popularity value.
pub const MAX_POPULARITY: u8 = 100;

/// On-disk shape of a dataset file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    orders: Vec<Order>,
}

/// A catalog together with its purchase history.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub catalog: Catalog,
    pub orders: Vec<Order>,
}

impl Dataset {
    /// The built-in 25-product, 25-order sample dataset.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded file is malformed.
    pub fn sample() -> Result<Self> {
        Self::from_toml_str(SAMPLE_TOML).context("parse built-in sample dataset")
    }

    /// Parse and validate a TOML dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML of the expected shape
    /// or fails [`Dataset::from_parts`] validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: DatasetFile = toml::from_str(text).context("parse TOML dataset")?;
        Ok(Self::from_parts(file.products, file.orders)?)
    }

    /// Parse and validate a JSON dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON of the expected shape
    /// or fails [`Dataset::from_parts`] validation.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(text).context("parse JSON dataset")?;
        Ok(Self::from_parts(file.products, file.orders)?)
    }

    /// Assemble a dataset from a product list and orders.
    ///
    /// Duplicate product ids and popularity above [`MAX_POPULARITY`] are
    /// rejected. Order ids missing from the catalog are accepted and only
    /// logged; the graph layer tolerates them.
    ///
    /// # Errors
    ///
    /// Returns [`CobuyError::InvalidDataset`] on the first violation found.
    pub fn from_parts(products: Vec<Product>, orders: Vec<Order>) -> Result<Self, CobuyError> {
        let mut catalog = Catalog::new();
        for product in products {
            if product.popularity > MAX_POPULARITY {
                return Err(CobuyError::InvalidDataset {
                    reason: format!(
                        "product {} has popularity {} (max {MAX_POPULARITY})",
                        product.id, product.popularity
                    ),
                });
            }
            let id = product.id;
            if catalog.insert(product).is_some() {
                return Err(CobuyError::InvalidDataset {
                    reason: format!("duplicate product id {id}"),
                });
            }
        }

        let dataset = Self { catalog, orders };
        let unknown = dataset.unknown_order_ids();
        if !unknown.is_empty() {
            warn!(
                count = unknown.len(),
                "orders reference product ids missing from the catalog"
            );
        }
        Ok(dataset)
    }

    /// Ids referenced by orders but absent from the catalog, deduplicated in
    /// first-seen order.
    #[must_use]
    pub fn unknown_order_ids(&self) -> Vec<crate::model::ProductId> {
        let mut seen = HashSet::new();
        self.orders
            .iter()
            .flat_map(Order::ids)
            .copied()
            .filter(|id| !self.catalog.contains(*id) && seen.insert(*id))
            .collect()
    }
}

/// Load a dataset file, picking the parser from the file extension.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, has an
/// extension other than `.toml`/`.json`, or fails to parse or validate.
#[instrument]
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(CobuyError::DatasetNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let dataset = match extension.as_str() {
        "toml" => Dataset::from_toml_str(&content),
        "json" => Dataset::from_json_str(&content),
        _ => return Err(CobuyError::UnsupportedFormat { extension }.into()),
    }
    .with_context(|| format!("Failed to load dataset {}", path.display()))?;

    debug!(
        products = dataset.catalog.len(),
        orders = dataset.orders.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Load the dataset at `path` if given, otherwise the built-in sample.
///
/// # Errors
///
/// Propagates [`load_dataset`] and [`Dataset::sample`] failures.
pub fn load_or_sample(path: Option<&Path>) -> Result<Dataset> {
    match path {
        Some(path) => load_dataset(path),
        None => Dataset::sample(),
    }
}
