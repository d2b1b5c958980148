//! `lumina-cart` — the shopping cart and its totals.

pub mod cart;
pub mod discount;

pub use cart::{Cart, CartItem, Totals};
pub use discount::Discount;
