//! Loading the product snapshot from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use lumina_catalog::{Catalog, CategoryName, Product};

use crate::manifest::read_manifest;

/// One category source that failed to load.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub category: CategoryName,
    pub reason: String,
}

/// The outcome of a snapshot load.
#[derive(Debug)]
pub struct SnapshotLoad {
    pub catalog: Catalog,
    /// Category files that were skipped (missing or malformed).
    pub failures: Vec<SourceFailure>,
}

/// A category file is either a bare array of products or `{"products": []}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryFile {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl CategoryFile {
    fn into_products(self) -> Vec<Product> {
        match self {
            CategoryFile::Bare(products) => products,
            CategoryFile::Wrapped { products } => products,
        }
    }
}

/// Path of the product file for one category: `<Category Name>.json`,
/// exactly as the category is named in the manifest.
fn category_file(data_dir: &Path, category: &CategoryName) -> PathBuf {
    data_dir.join(format!("{}.json", category.as_str()))
}

/// Load the full snapshot from `data_dir`.
///
/// A missing or unreadable manifest degrades to [`Catalog::unavailable`];
/// a broken category file is skipped and recorded in `failures` while the
/// rest of the catalog loads (the shop stays usable with a partial
/// catalog).
pub fn load_snapshot(data_dir: &Path) -> SnapshotLoad {
    let manifest_path = data_dir.join("categories.xml");
    let categories = match read_manifest(&manifest_path) {
        Ok(categories) => categories,
        Err(err) => {
            tracing::error!("catalog unavailable: {err:#}");
            return SnapshotLoad {
                catalog: Catalog::unavailable(),
                failures: Vec::new(),
            };
        }
    };

    let mut products: Vec<Product> = Vec::new();
    let mut failures = Vec::new();

    for category in &categories {
        match load_category(data_dir, category) {
            Ok(mut batch) => products.append(&mut batch),
            Err(err) => {
                tracing::warn!("skipping category {category}: {err:#}");
                failures.push(SourceFailure {
                    category: category.clone(),
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    tracing::info!(
        products = products.len(),
        categories = categories.len(),
        skipped = failures.len(),
        "catalog snapshot loaded"
    );

    SnapshotLoad {
        catalog: Catalog::new(products, categories),
        failures,
    }
}

fn load_category(data_dir: &Path, category: &CategoryName) -> anyhow::Result<Vec<Product>> {
    let path = category_file(data_dir, category);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {path:?}"))?;
    let file: CategoryFile = serde_json::from_str(&raw)
        .with_context(|| format!("malformed product file {path:?}"))?;

    let mut batch = file.into_products();
    // Records usually omit the category they sit in; tag them with the
    // file's category so filtering and counts see every product.
    for product in &mut batch {
        if product.category.is_none() {
            product.category = Some(category.clone());
        }
    }
    Ok(batch)
}
