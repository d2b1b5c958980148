//! `lumina-catalog` — the product model and the filter/sort/paginate engine.
//!
//! Everything here is pure: a [`Catalog`] is an immutable snapshot of the
//! loaded products, and [`Catalog::query`] derives the visible page for a
//! given [`FilterState`], [`SortKey`] and page request without mutating
//! anything. The rendering layer consumes the result; this crate makes no
//! assumption about how it is displayed.

pub mod filter;
pub mod product;
pub mod query;

pub use filter::{FilterState, PriceBounds, SortKey};
pub use product::{CategoryName, Product};
pub use query::{Catalog, CategoryCount, PageRequest, QueryResult};
