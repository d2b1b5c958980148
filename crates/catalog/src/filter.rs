//! Filter criteria and sort keys.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use lumina_core::Price;

use crate::product::{CategoryName, Product};

/// Inclusive price bounds. `max = None` means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: Price,
    pub max: Option<Price>,
}

impl PriceBounds {
    pub fn new(min: Price, max: Option<Price>) -> Self {
        Self { min, max }
    }

    /// Build bounds from the raw text of the two price inputs. Malformed
    /// input silently falls back to the permissive default for that bound
    /// (0 for min, unbounded for max).
    pub fn from_raw(min_text: &str, max_text: &str) -> Self {
        Self {
            min: Price::parse(min_text).unwrap_or(Price::ZERO),
            max: Price::parse(max_text),
        }
    }

    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

/// The combination of criteria applied to a product list.
///
/// The three predicates are conjunctive; the query's own OR across
/// name/category/description is the only disjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected categories. Empty means all categories.
    pub categories: BTreeSet<CategoryName>,
    pub price: PriceBounds,
    /// Free-text query, matched case-insensitively as a substring.
    pub query: String,
}

impl FilterState {
    pub fn with_category(category: CategoryName) -> Self {
        Self {
            categories: BTreeSet::from([category]),
            ..Self::default()
        }
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_price(product) && self.matches_query(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        product
            .category
            .as_ref()
            .is_some_and(|c| self.categories.contains(c))
    }

    fn matches_price(&self, product: &Product) -> bool {
        self.price.contains(product.price)
    }

    fn matches_query(&self, product: &Product) -> bool {
        let term = self.query.trim();
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        product.name.to_lowercase().contains(&term)
            || product.category_str().to_lowercase().contains(&term)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

/// Total order applied to the filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Preserve the snapshot's load order.
    #[default]
    Default,
    PriceAscending,
    PriceDescending,
    NameAscending,
    NameDescending,
}
