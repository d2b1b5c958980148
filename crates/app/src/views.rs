//! Small view-model pieces shared across pages.

use serde::Serialize;

use lumina_catalog::Product;
use lumina_core::ProductId;

/// A product card as rendered in grids (list page, related products).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category_label: String,
    /// Formatted unit price, e.g. `$19.99`.
    pub price_text: String,
    pub image: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category_label: product.category_str().to_string(),
            price_text: product.price.to_string(),
            image: product.primary_image().map(str::to_string),
        }
    }
}
