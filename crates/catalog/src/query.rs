//! The filter/sort/paginate engine.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::filter::{FilterState, SortKey};
use crate::product::{CategoryName, Product};

/// An immutable snapshot of the loaded catalog.
///
/// `categories` carries the manifest's labels in manifest order; the
/// per-category counts in every query result follow that order so filter
/// checkboxes render consistently. `load_failed` is the explicit error
/// flag for a snapshot that could not be loaded at all: queries against it
/// return empty results rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<CategoryName>,
    load_failed: bool,
}

/// Which page of the filtered list to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number. Out-of-range values clamp to `[1, total_pages]`.
    pub page: u32,
    pub page_size: usize,
}

impl PageRequest {
    pub fn first(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }
}

/// Count of products in one category, measured against the UNFILTERED list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: CategoryName,
    pub count: usize,
}

/// The derived page plus the auxiliary counts the page chrome needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The visible slice of the filtered, sorted list.
    pub items: Vec<Product>,
    /// Total products that passed the filter (across all pages).
    pub total_count: usize,
    /// `ceil(total_count / page_size)`; 0 when nothing matched.
    pub total_pages: u32,
    /// The effective (clamped) page number; 1 when there are no results.
    pub page: u32,
    /// Per-category counts over the full snapshot, in manifest order.
    pub category_counts: Vec<CategoryCount>,
    /// True when the snapshot itself failed to load.
    pub load_failed: bool,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<CategoryName>) -> Self {
        Self {
            products,
            categories,
            load_failed: false,
        }
    }

    /// The empty snapshot a failed load degrades to.
    pub fn unavailable() -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            load_failed: true,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[CategoryName] {
        &self.categories
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by id, falling back to the positional index for
    /// snapshots whose records carry no usable id, then to an exact name
    /// match. Deep links encode any of the three.
    pub fn find(&self, id_or_index: &str, name: Option<&str>) -> Option<&Product> {
        if let Some(found) = self.products.iter().find(|p| p.id.as_str() == id_or_index) {
            return Some(found);
        }
        if let Ok(index) = id_or_index.parse::<usize>() {
            if let Some(found) = self.products.get(index) {
                return Some(found);
            }
        }
        name.and_then(|n| self.products.iter().find(|p| p.name == n))
    }

    /// Per-category counts over the full snapshot. Independent of any
    /// active filter so the sidebar annotations stay stable.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        self.categories
            .iter()
            .map(|category| CategoryCount {
                category: category.clone(),
                count: self
                    .products
                    .iter()
                    .filter(|p| p.category.as_ref() == Some(category))
                    .count(),
            })
            .collect()
    }

    /// Derive the visible page for the given criteria.
    ///
    /// Deterministic in (snapshot, filter, sort): the same inputs always
    /// produce the same result, and paging never re-filters or re-sorts.
    pub fn query(&self, filter: &FilterState, sort: SortKey, request: PageRequest) -> QueryResult {
        let filtered = self.filter_and_sort(filter, sort);
        let total_count = filtered.len();
        let page_size = request.page_size.max(1);
        let total_pages = total_count.div_ceil(page_size) as u32;

        // Clamp rather than overflow into an empty page; with no results
        // there is nothing to clamp to and pagination is hidden entirely.
        let page = if total_pages == 0 {
            1
        } else {
            request.page.clamp(1, total_pages)
        };

        let start = (page as usize - 1) * page_size;
        let items = filtered
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        QueryResult {
            items,
            total_count,
            total_pages,
            page,
            category_counts: self.category_counts(),
            load_failed: self.load_failed,
        }
    }

    fn filter_and_sort(&self, filter: &FilterState, sort: SortKey) -> Vec<&Product> {
        let mut filtered: Vec<&Product> =
            self.products.iter().filter(|p| filter.matches(p)).collect();

        // Vec::sort_by is stable, so ties keep insertion order for every key.
        match sort {
            SortKey::Default => {}
            SortKey::PriceAscending => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceDescending => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::NameAscending => {
                filtered.sort_by(|a, b| collation_key(&a.name).cmp(&collation_key(&b.name)))
            }
            SortKey::NameDescending => {
                filtered.sort_by(|a, b| collation_key(&b.name).cmp(&collation_key(&a.name)))
            }
        }

        filtered
    }
}

/// Collation key for name ordering: NFKD-normalized, accents stripped,
/// case-folded. "Éclair" sorts with "eclair", not after "z".
fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::{Price, ProductId};

    fn product(id: &str, name: &str, category: &str, cents: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: Some(CategoryName::new(category)),
            price: Price::from_cents(cents),
            stock: 1,
            image: Vec::new(),
            description: None,
            sku: None,
            sizes: Vec::new(),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                product("1", "Red Shirt", "Clothing", 1999),
                product("2", "Blue Pants", "Clothing", 3999),
                product("3", "White Shirt", "Clothing", 2499),
                product("4", "Desk Lamp", "Home & Kitchen", 2499),
            ],
            vec![CategoryName::new("Clothing"), CategoryName::new("Home & Kitchen")],
        )
    }

    #[test]
    fn empty_filter_returns_full_list_in_load_order() {
        let catalog = sample_catalog();
        let result = catalog.query(&FilterState::default(), SortKey::Default, PageRequest::first(9));
        assert_eq!(result.total_count, 4);
        let names: Vec<&str> = result.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Red Shirt", "Blue Pants", "White Shirt", "Desk Lamp"]);
    }

    #[test]
    fn search_shirt_returns_both_shirts_in_input_order() {
        let catalog = sample_catalog();
        let result = catalog.query(
            &FilterState::with_query("shirt"),
            SortKey::Default,
            PageRequest::first(9),
        );
        let names: Vec<&str> = result.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Red Shirt", "White Shirt"]);
    }

    #[test]
    fn category_counts_ignore_the_active_filter() {
        let catalog = sample_catalog();
        let result = catalog.query(
            &FilterState::with_category(CategoryName::new("Home & Kitchen")),
            SortKey::Default,
            PageRequest::first(9),
        );
        assert_eq!(result.total_count, 1);
        assert_eq!(result.category_counts[0].count, 3);
        assert_eq!(result.category_counts[1].count, 1);
    }

    #[test]
    fn price_sort_is_stable_on_ties() {
        let catalog = sample_catalog();
        let result = catalog.query(
            &FilterState::default(),
            SortKey::PriceAscending,
            PageRequest::first(9),
        );
        let names: Vec<&str> = result.items.iter().map(|p| p.name.as_str()).collect();
        // White Shirt and Desk Lamp tie at $24.99; insertion order breaks it.
        assert_eq!(names, vec!["Red Shirt", "White Shirt", "Desk Lamp", "Blue Pants"]);
    }

    #[test]
    fn name_sort_collates_case_insensitively_and_ignores_accents() {
        let catalog = Catalog::new(
            vec![
                product("1", "zebra print", "Clothing", 100),
                product("2", "Éclair mold", "Home & Kitchen", 100),
                product("3", "apron", "Home & Kitchen", 100),
            ],
            vec![],
        );
        let result = catalog.query(
            &FilterState::default(),
            SortKey::NameAscending,
            PageRequest::first(9),
        );
        let names: Vec<&str> = result.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["apron", "Éclair mold", "zebra print"]);
    }

    #[test]
    fn twelve_products_page_size_nine_gives_two_pages_and_clamps_page_three() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(&i.to_string(), &format!("P{i}"), "Clothing", 100 + i))
            .collect();
        let catalog = Catalog::new(products, vec![CategoryName::new("Clothing")]);

        let page1 = catalog.query(&FilterState::default(), SortKey::Default, PageRequest { page: 1, page_size: 9 });
        assert_eq!(page1.items.len(), 9);
        assert_eq!(page1.total_pages, 2);

        let page2 = catalog.query(&FilterState::default(), SortKey::Default, PageRequest { page: 2, page_size: 9 });
        assert_eq!(page2.items.len(), 3);

        let page3 = catalog.query(&FilterState::default(), SortKey::Default, PageRequest { page: 3, page_size: 9 });
        assert_eq!(page3.page, 2);
        assert_eq!(page3.items, page2.items);
    }

    #[test]
    fn empty_results_hide_pagination_instead_of_clamping() {
        let catalog = sample_catalog();
        let result = catalog.query(
            &FilterState::with_query("no such product"),
            SortKey::Default,
            PageRequest { page: 7, page_size: 9 },
        );
        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.page, 1);
        assert!(result.items.is_empty());
    }

    #[test]
    fn unavailable_snapshot_queries_as_empty_with_error_flag() {
        let catalog = Catalog::unavailable();
        let result = catalog.query(&FilterState::default(), SortKey::Default, PageRequest::first(30));
        assert!(result.load_failed);
        assert_eq!(result.total_count, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn find_cascades_from_id_to_index_to_name() {
        let catalog = Catalog::new(
            vec![
                product("a7", "Red Shirt", "Clothing", 1999),
                product("b9", "Blue Pants", "Clothing", 3999),
            ],
            vec![],
        );
        assert_eq!(catalog.find("b9", None).unwrap().name, "Blue Pants");
        // "1" is no product's id, but it is a valid index.
        assert_eq!(catalog.find("1", None).unwrap().name, "Blue Pants");
        assert_eq!(
            catalog.find("zz", Some("Red Shirt")).unwrap().name,
            "Red Shirt"
        );
        assert!(catalog.find("zz", None).is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec(
                ("[a-e]", "[A-Za-z ]{1,12}", 0u64..5_000).prop_map(|(cat, name, cents)| {
                    let mut p = product("x", &name, &cat, cents);
                    p.id = ProductId::new(format!("{name}-{cents}"));
                    p
                }),
                0..40,
            )
        }

        proptest! {
            /// Concatenating all pages reproduces the filtered/sorted list
            /// exactly once, with no gaps or duplicates.
            #[test]
            fn pagination_partitions_the_filtered_list(
                products in arb_products(),
                page_size in 1usize..10,
            ) {
                let catalog = Catalog::new(products, vec![]);
                let filter = FilterState::default();
                let all = catalog.query(&filter, SortKey::PriceAscending, PageRequest {
                    page: 1,
                    page_size: usize::MAX / 2,
                });

                let mut stitched = Vec::new();
                let total_pages = catalog
                    .query(&filter, SortKey::PriceAscending, PageRequest { page: 1, page_size })
                    .total_pages;
                for page in 1..=total_pages.max(1) {
                    let result = catalog.query(&filter, SortKey::PriceAscending, PageRequest { page, page_size });
                    stitched.extend(result.items);
                }

                prop_assert_eq!(stitched, all.items);
            }

            /// Every output product satisfies every active predicate.
            #[test]
            fn filter_output_is_sound(
                products in arb_products(),
                min in 0u64..3_000,
                span in 0u64..3_000,
            ) {
                let bounds = crate::filter::PriceBounds::new(
                    Price::from_cents(min),
                    Some(Price::from_cents(min + span)),
                );
                let filter = FilterState {
                    categories: std::collections::BTreeSet::from([CategoryName::new("a")]),
                    price: bounds.clone(),
                    query: String::new(),
                };
                let catalog = Catalog::new(products, vec![]);
                let result = catalog.query(&filter, SortKey::Default, PageRequest::first(usize::MAX / 2));

                for p in &result.items {
                    prop_assert_eq!(p.category_str(), "a");
                    prop_assert!(bounds.contains(p.price));
                }

                // Completeness: nothing matching was dropped.
                let expected = catalog
                    .products()
                    .iter()
                    .filter(|p| filter.matches(p))
                    .count();
                prop_assert_eq!(result.total_count, expected);
            }

            /// Ascending then descending price sorts are exact reverses
            /// when all prices are distinct.
            #[test]
            fn price_sorts_reverse_each_other_on_distinct_prices(count in 0usize..20) {
                let products: Vec<Product> = (0..count)
                    .map(|i| product(&i.to_string(), &format!("P{i}"), "a", 100 + (i as u64) * 7))
                    .collect();
                let catalog = Catalog::new(products, vec![]);
                let filter = FilterState::default();
                let request = PageRequest::first(usize::MAX / 2);

                let asc = catalog.query(&filter, SortKey::PriceAscending, request);
                let mut desc = catalog.query(&filter, SortKey::PriceDescending, request);
                desc.items.reverse();
                prop_assert_eq!(asc.items, desc.items);
            }

            /// Changing only the page number never changes the underlying
            /// filtered list (count, pages, counts all stable).
            #[test]
            fn paging_does_not_disturb_the_filtered_list(
                products in arb_products(),
                page in 1u32..12,
            ) {
                let catalog = Catalog::new(products, vec![CategoryName::new("a")]);
                let filter = FilterState::with_query("a");
                let first = catalog.query(&filter, SortKey::NameAscending, PageRequest { page: 1, page_size: 5 });
                let other = catalog.query(&filter, SortKey::NameAscending, PageRequest { page, page_size: 5 });

                prop_assert_eq!(first.total_count, other.total_count);
                prop_assert_eq!(first.total_pages, other.total_pages);
                prop_assert_eq!(first.category_counts, other.category_counts);
            }
        }
    }
}
