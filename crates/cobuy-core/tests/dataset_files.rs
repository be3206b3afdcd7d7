//! File-based dataset loading: extension dispatch, error typing, and the
//! `load_or_sample` fallback.

use std::path::Path;

use cobuy_core::dataset::{load_dataset, load_or_sample};
use cobuy_core::error::{CobuyError, ErrorCode};
use cobuy_core::{Order, ProductId};
use tempfile::TempDir;

const TOML_DATASET: &str = r#"
orders = [[1, 2], [2, 3, 1]]

[[products]]
id = 1
name = "Kettle"
category = "Kitchen"
price = 30.0
quantity = 4
popularity = 70

[[products]]
id = 2
name = "Teapot"
category = "Kitchen"
price = 22.5
quantity = 9
popularity = 55
"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write dataset");
    path
}

fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CobuyError>())
        .map(CobuyError::error_code)
}

#[test]
fn toml_file_loads() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(dir.path(), "catalog.toml", TOML_DATASET);

    let dataset = load_dataset(&path).expect("load");
    assert_eq!(dataset.catalog.len(), 2);
    assert_eq!(dataset.orders[1], Order::from_ids([2, 3, 1]));
    assert_eq!(dataset.unknown_order_ids(), vec![ProductId(3)]);
}

#[test]
fn json_file_loads_with_uppercase_extension() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "catalog.JSON",
        r#"{"products": [{"id": 5, "name": "Lamp", "category": "Home", "price": 9.0, "quantity": 1, "popularity": 12}]}"#,
    );

    let dataset = load_dataset(&path).expect("load");
    assert!(dataset.catalog.contains(ProductId(5)));
    assert!(dataset.orders.is_empty());
}

#[test]
fn missing_file_is_dataset_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_dataset(&dir.path().join("nope.toml")).expect_err("must fail");
    assert_eq!(error_code(&err), Some(ErrorCode::DatasetNotFound));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(dir.path(), "catalog.yaml", "products: []");
    let err = load_dataset(&path).expect_err("must fail");
    assert_eq!(error_code(&err), Some(ErrorCode::UnsupportedFormat));
}

#[test]
fn invalid_popularity_surfaces_typed_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "bad.toml",
        "[[products]]\nid = 1\nname = \"X\"\ncategory = \"Y\"\nprice = 1.0\nquantity = 1\npopularity = 150\n",
    );
    let err = load_dataset(&path).expect_err("must fail");
    assert_eq!(error_code(&err), Some(ErrorCode::InvalidDataset));
}

#[test]
fn no_path_falls_back_to_sample() {
    let dataset = load_or_sample(None).expect("sample");
    assert_eq!(dataset.catalog.len(), 25);
}
