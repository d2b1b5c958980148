//! Storefront configuration.
//!
//! One configuration object holds the constants that would otherwise be
//! duplicated per page and left to drift: the storage key prefix, the
//! brand used on order numbers, the catalog page size, and where the
//! snapshot files live.

use std::path::PathBuf;

/// Configuration for one storefront deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Prefix for every document key in the local store.
    pub key_prefix: String,
    /// Brand token stamped into order numbers.
    pub brand: String,
    /// Products per catalog page.
    pub page_size: usize,
    /// Directory holding `categories.xml`, the per-category product files
    /// and `reviews.json`.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub const DEFAULT_PAGE_SIZE: usize = 30;

    pub fn builder(data_dir: impl Into<PathBuf>) -> StoreConfigBuilder {
        StoreConfigBuilder {
            key_prefix: None,
            brand: None,
            page_size: None,
            data_dir: data_dir.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfigBuilder {
    key_prefix: Option<String>,
    brand: Option<String>,
    page_size: Option<usize>,
    data_dir: PathBuf,
}

impl StoreConfigBuilder {
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn build(self) -> StoreConfig {
        let key_prefix = self
            .key_prefix
            .unwrap_or_else(|| lumina_storage::StoreKeys::DEFAULT_PREFIX.to_string());
        // The brand defaults to the shouted key prefix ("lumina" → "LUMINA").
        let brand = self.brand.unwrap_or_else(|| key_prefix.to_uppercase());
        StoreConfig {
            key_prefix,
            brand,
            page_size: self.page_size.unwrap_or(StoreConfig::DEFAULT_PAGE_SIZE),
            data_dir: self.data_dir,
        }
    }
}
