//! The product-list page.
//!
//! Owns all browsing state (the snapshot handle, the filter, the sort
//! key, the current page) and derives a view model after every change.
//! All derivations go through [`Catalog::query`]; this controller only
//! decides when state changes and how the result is shaped for rendering.

use std::rc::Rc;

use serde::Serialize;

use lumina_catalog::{Catalog, CategoryName, FilterState, PageRequest, PriceBounds, SortKey};

use crate::views::ProductCard;

/// How many numbered page buttons the pagination strip shows at once.
const MAX_VISIBLE_PAGES: u32 = 5;

/// One category checkbox in the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCheckbox {
    pub category: CategoryName,
    /// Count over the full catalog, independent of the active filter.
    pub count: usize,
    pub checked: bool,
}

/// The numbered-page strip. Absent entirely when there is one page or
/// fewer; the page hides the element rather than render a dead strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationViewModel {
    pub current: u32,
    pub total_pages: u32,
    /// The visible window of page numbers (at most [`MAX_VISIBLE_PAGES`]).
    pub window: Vec<u32>,
    /// Show a "1" shortcut before the window, and whether it needs "…".
    pub show_first: bool,
    pub leading_gap: bool,
    /// Show a last-page shortcut after the window, and whether it needs "…".
    pub show_last: bool,
    pub trailing_gap: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Everything the product-list page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogViewModel {
    pub items: Vec<ProductCard>,
    /// "Showing 12 products", with the query appended when searching.
    pub results_line: String,
    pub total_count: usize,
    pub page: u32,
    pub total_pages: u32,
    pub pagination: Option<PaginationViewModel>,
    pub filters: Vec<CategoryCheckbox>,
    /// True when the snapshot failed to load; the page renders its
    /// "no products available" state instead of an empty grid.
    pub load_failed: bool,
}

/// State and operations of the product-list page.
#[derive(Debug, Clone)]
pub struct CatalogController {
    catalog: Rc<Catalog>,
    filter: FilterState,
    sort: SortKey,
    page: u32,
    page_size: usize,
}

impl CatalogController {
    pub fn new(catalog: Rc<Catalog>, page_size: usize) -> Self {
        Self {
            catalog,
            filter: FilterState::default(),
            sort: SortKey::default(),
            page: 1,
            page_size,
        }
    }

    /// Apply deep-link parameters (`?category=…&search=…`) before the
    /// first render.
    pub fn with_initial(
        mut self,
        category: Option<CategoryName>,
        query: Option<String>,
    ) -> Self {
        if let Some(category) = category {
            self.filter.categories.insert(category);
        }
        if let Some(query) = query {
            self.filter.query = query;
        }
        self
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Derive the current view. Idempotent and side-effect-free; calling
    /// it twice in a row renders the same thing.
    pub fn view(&self) -> CatalogViewModel {
        let result = self
            .catalog
            .query(&self.filter, self.sort, PageRequest {
                page: self.page,
                page_size: self.page_size,
            });

        let mut results_line = format!(
            "Showing {} product{}",
            result.total_count,
            if result.total_count == 1 { "" } else { "s" }
        );
        let query = self.filter.query.trim();
        if !query.is_empty() {
            results_line.push_str(&format!(" for \"{query}\""));
        }

        // An empty selection means "all categories", which the sidebar
        // renders as every box checked.
        let all_checked = self.filter.categories.is_empty();
        let filters = result
            .category_counts
            .iter()
            .map(|entry| CategoryCheckbox {
                checked: all_checked || self.filter.categories.contains(&entry.category),
                category: entry.category.clone(),
                count: entry.count,
            })
            .collect();

        CatalogViewModel {
            items: result.items.iter().map(ProductCard::from_product).collect(),
            results_line,
            total_count: result.total_count,
            page: result.page,
            total_pages: result.total_pages,
            pagination: pagination(result.page, result.total_pages),
            filters,
            load_failed: result.load_failed,
        }
    }

    /// Check or uncheck one category box. Any filter change resets to
    /// page 1.
    pub fn toggle_category(&mut self, category: CategoryName) -> CatalogViewModel {
        if !self.filter.categories.remove(&category) {
            self.filter.categories.insert(category);
        }
        self.page = 1;
        self.view()
    }

    /// Set the price bounds from the raw input text; malformed bounds
    /// silently fall back to permissive defaults.
    pub fn set_price_bounds(&mut self, min_text: &str, max_text: &str) -> CatalogViewModel {
        self.filter.price = PriceBounds::from_raw(min_text, max_text);
        self.page = 1;
        self.view()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> CatalogViewModel {
        self.filter.query = query.into();
        self.page = 1;
        self.view()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> CatalogViewModel {
        self.sort = sort;
        self.page = 1;
        self.view()
    }

    /// Jump to a page; the query layer clamps out-of-range requests.
    pub fn goto_page(&mut self, page: u32) -> CatalogViewModel {
        self.page = page;
        let view = self.view();
        self.page = view.page;
        view
    }

    pub fn next_page(&mut self) -> CatalogViewModel {
        self.goto_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> CatalogViewModel {
        self.goto_page(self.page.saturating_sub(1).max(1))
    }
}

/// The 5-wide pagination window centered on the current page, with
/// first/last shortcuts and gap markers at the edges.
fn pagination(current: u32, total_pages: u32) -> Option<PaginationViewModel> {
    if total_pages <= 1 {
        return None;
    }

    let mut start = current.saturating_sub(2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end - start < MAX_VISIBLE_PAGES - 1 {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }

    Some(PaginationViewModel {
        current,
        total_pages,
        window: (start..=end).collect(),
        show_first: start > 1,
        leading_gap: start > 2,
        show_last: end < total_pages,
        trailing_gap: end < total_pages - 1,
        prev_enabled: current > 1,
        next_enabled: current < total_pages,
    })
}
