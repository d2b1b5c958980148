//! The product-detail page.

use std::rc::Rc;

use rand::seq::SliceRandom;
use serde::Serialize;

use lumina_catalog::{Catalog, Product};
use lumina_core::{DomainError, DomainResult};
use lumina_loader::{ReviewDirectory, ReviewSummary};

use crate::state::SharedState;
use crate::views::ProductCard;

/// How many related products the strip below the reviews shows.
const RELATED_COUNT: usize = 4;

/// One rendered review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewCard {
    /// Avatar initials, e.g. "HJ" for "Harvey J.".
    pub initials: String,
    pub user: String,
    pub title: Option<String>,
    pub rating: u8,
    pub comment: String,
}

/// Everything the detail page renders for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailViewModel {
    pub card: ProductCard,
    pub sku_text: String,
    pub in_stock: bool,
    /// "In Stock" / "Out of Stock".
    pub availability: String,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub sizes: Vec<String>,
    pub review_summary: Option<ReviewSummary>,
    pub reviews: Vec<ReviewCard>,
    pub related: Vec<ProductCard>,
}

/// The product-detail page: lookup, view derivation, add-to-cart.
pub struct ProductDetailController {
    catalog: Rc<Catalog>,
    reviews: Rc<ReviewDirectory>,
    state: SharedState,
}

impl ProductDetailController {
    pub fn new(catalog: Rc<Catalog>, reviews: Rc<ReviewDirectory>, state: SharedState) -> Self {
        Self {
            catalog,
            reviews,
            state,
        }
    }

    /// Resolve a deep link: by id, then by positional index, then by
    /// exact name. Links in circulation encode any of the three.
    pub fn find(&self, id_or_index: &str, name: Option<&str>) -> DomainResult<&Product> {
        self.catalog
            .find(id_or_index, name)
            .ok_or(DomainError::NotFound)
    }

    pub fn view(&self, id_or_index: &str, name: Option<&str>) -> DomainResult<ProductDetailViewModel> {
        let product = self.find(id_or_index, name)?;
        let reviews = self.reviews.for_product(&product.id);

        Ok(ProductDetailViewModel {
            card: ProductCard::from_product(product),
            sku_text: product.sku.clone().unwrap_or_else(|| "N/A".to_string()),
            in_stock: product.in_stock(),
            availability: if product.in_stock() { "In Stock" } else { "Out of Stock" }.to_string(),
            images: product.image.clone(),
            description: product.description.clone(),
            sizes: product.sizes.clone(),
            review_summary: self.reviews.summary_for(&product.id),
            reviews: reviews
                .iter()
                .map(|r| ReviewCard {
                    initials: r.initials(),
                    user: r.user.clone(),
                    title: r.title.clone(),
                    rating: r.rating,
                    comment: r.comment.clone(),
                })
                .collect(),
            related: self.related_products(product),
        })
    }

    /// Up to four other products from the same category, sampled at
    /// random per render.
    fn related_products(&self, product: &Product) -> Vec<ProductCard> {
        let candidates: Vec<&Product> = self
            .catalog
            .products()
            .iter()
            .filter(|p| p.id != product.id && p.category == product.category)
            .collect();

        candidates
            .choose_multiple(&mut rand::thread_rng(), RELATED_COUNT)
            .map(|p| ProductCard::from_product(p))
            .collect()
    }

    /// Add the product to the persisted cart and return the new badge
    /// count for the header.
    pub fn add_to_cart(
        &self,
        id_or_index: &str,
        quantity: u32,
        size: Option<String>,
    ) -> DomainResult<u32> {
        let product = self.find(id_or_index, None)?;
        let mut cart = self.state.cart();
        cart.add(product, quantity, size)?;
        self.state.save_cart(&cart);
        tracing::debug!(product = %product.id, quantity, "added to cart");
        Ok(cart.item_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_catalog::CategoryName;
    use lumina_core::{Price, ProductId};
    use lumina_storage::{Store, StoreKeys};

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: Some(CategoryName::new(category)),
            price: Price::from_dollars(10, 0),
            stock: if id == "sold-out" { 0 } else { 3 },
            image: vec![format!("{id}-a.jpg"), format!("{id}-b.jpg")],
            description: Some("A fine thing".to_string()),
            sku: None,
            sizes: vec!["S".to_string(), "M".to_string()],
        }
    }

    fn controller(products: Vec<Product>) -> ProductDetailController {
        ProductDetailController::new(
            Rc::new(Catalog::new(products, vec![])),
            Rc::new(ReviewDirectory::default()),
            SharedState::new(Store::memory(), StoreKeys::default()),
        )
    }

    #[test]
    fn view_carries_images_sizes_and_availability() {
        let controller = controller(vec![product("p1", "Clothing")]);
        let view = controller.view("p1", None).unwrap();
        assert_eq!(view.images.len(), 2);
        assert_eq!(view.sizes, vec!["S", "M"]);
        assert_eq!(view.availability, "In Stock");
        assert_eq!(view.sku_text, "N/A");
        assert!(view.reviews.is_empty());
        assert!(view.review_summary.is_none());
    }

    #[test]
    fn sold_out_products_render_out_of_stock() {
        let controller = controller(vec![product("sold-out", "Clothing")]);
        let view = controller.view("sold-out", None).unwrap();
        assert!(!view.in_stock);
        assert_eq!(view.availability, "Out of Stock");
    }

    #[test]
    fn unknown_products_are_not_found() {
        let controller = controller(vec![product("p1", "Clothing")]);
        assert_eq!(
            controller.view("nope", None).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn related_products_come_from_the_same_category_excluding_self() {
        let mut products = vec![product("p1", "Clothing")];
        for i in 0..6 {
            products.push(product(&format!("c{i}"), "Clothing"));
            products.push(product(&format!("e{i}"), "Electronics"));
        }
        let controller = controller(products);

        let view = controller.view("p1", None).unwrap();
        assert_eq!(view.related.len(), 4);
        for card in &view.related {
            assert_eq!(card.category_label, "Clothing");
            assert_ne!(card.id.as_str(), "p1");
        }
    }

    #[test]
    fn fewer_candidates_than_four_returns_them_all() {
        let controller = controller(vec![
            product("p1", "Clothing"),
            product("p2", "Clothing"),
        ]);
        let view = controller.view("p1", None).unwrap();
        assert_eq!(view.related.len(), 1);
    }

    #[test]
    fn add_to_cart_persists_and_returns_the_badge_count() {
        let controller = controller(vec![product("p1", "Clothing")]);
        assert_eq!(controller.add_to_cart("p1", 2, Some("M".to_string())).unwrap(), 2);
        assert_eq!(controller.add_to_cart("p1", 1, Some("M".to_string())).unwrap(), 3);
        assert_eq!(
            controller.add_to_cart("ghost", 1, None).unwrap_err(),
            DomainError::NotFound
        );
    }
}
