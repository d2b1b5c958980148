//! The home page: category tiles and footer links.

use std::rc::Rc;

use serde::Serialize;

use lumina_catalog::{Catalog, CategoryName};

/// How many category links the footer shows.
const FOOTER_CATEGORY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeViewModel {
    /// One tile per manifest category, in manifest order.
    pub tiles: Vec<CategoryName>,
    /// The first few categories, repeated in the footer.
    pub footer_categories: Vec<CategoryName>,
    pub load_failed: bool,
}

pub struct HomeController {
    catalog: Rc<Catalog>,
}

impl HomeController {
    pub fn new(catalog: Rc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn view(&self) -> HomeViewModel {
        let tiles = self.catalog.categories().to_vec();
        let footer_categories = tiles
            .iter()
            .take(FOOTER_CATEGORY_COUNT)
            .cloned()
            .collect();
        HomeViewModel {
            tiles,
            footer_categories,
            load_failed: self.catalog.load_failed(),
        }
    }
}
