//! Order assembly and the confirmation document.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use lumina_cart::{Cart, CartItem, Discount, Totals};
use lumina_core::{DomainError, DomainResult, OrderId};

use crate::checkout::{ContactDetails, ShippingMethod};

/// A placed order, persisted for the confirmation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number, e.g. `#LUMINA482950217`.
    pub number: String,
    pub contact: ContactDetails,
    pub shipping_method: ShippingMethod,
    pub items: Vec<CartItem>,
    pub totals: Totals,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Freeze the cart into an order. The cart must not be empty; the
    /// caller clears it only after the order persists.
    pub fn place(
        contact: ContactDetails,
        shipping_method: ShippingMethod,
        cart: &Cart,
        discount: Option<Discount>,
        now: DateTime<Utc>,
    ) -> DomainResult<Order> {
        if cart.is_empty() {
            return Err(DomainError::invariant("cart is empty"));
        }

        Ok(Order {
            id: OrderId::new(),
            number: generate_order_number("LUMINA", now),
            contact,
            shipping_method,
            items: cart.items().to_vec(),
            totals: cart.totals(discount),
            placed_at: now,
        })
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// `#<brand><last 5 digits of the ms timestamp><4-digit random suffix>`.
pub fn generate_order_number(brand: &str, now: DateTime<Utc>) -> String {
    let timestamp = now.timestamp_millis().unsigned_abs();
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("#{brand}{:05}{suffix:04}", timestamp % 100_000)
}
