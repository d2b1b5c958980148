//! Cart state and mutation.

use serde::{Deserialize, Serialize};

use lumina_catalog::{CategoryName, Product};
use lumina_core::{DomainError, DomainResult, Price, ProductId};

use crate::discount::Discount;

/// One cart line: a product snapshot at the moment it was added, a
/// quantity, and the chosen size (if the product has variants).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryName>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Derived money figures for the cart (and, frozen, for an order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Price,
    pub shipping: Price,
    pub discount: Price,
    pub total: Price,
}

/// The shopping cart: a flat list of lines, merged on (product, size).
///
/// # Invariants
/// - Every line has quantity ≥ 1.
/// - At most one line per (product id, size) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Shipping is free on every order.
    pub const SHIPPING: Price = Price::ZERO;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines, the header badge number.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add a product. An existing (product, size) line absorbs the
    /// quantity; otherwise a new line snapshots the product.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
    ) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        let existing = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id && item.size == size);

        match existing {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image: product.primary_image().map(str::to_string),
                category: product.category.clone(),
                quantity,
                size,
            }),
        }
        Ok(())
    }

    pub fn increment(&mut self, index: usize) -> DomainResult<()> {
        let item = self.items.get_mut(index).ok_or(DomainError::NotFound)?;
        item.quantity += 1;
        Ok(())
    }

    /// Decrease a line's quantity. At quantity 1 this is a no-op; a line
    /// only leaves the cart through [`Cart::remove`].
    pub fn decrement(&mut self, index: usize) -> DomainResult<()> {
        let item = self.items.get_mut(index).ok_or(DomainError::NotFound)?;
        if item.quantity > 1 {
            item.quantity -= 1;
        }
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> DomainResult<CartItem> {
        if index >= self.items.len() {
            return Err(DomainError::NotFound);
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Derive the money figures, with an optional applied discount.
    pub fn totals(&self, discount: Option<Discount>) -> Totals {
        let subtotal: Price = self.items.iter().map(CartItem::line_total).sum();
        let shipping = Self::SHIPPING;

        let discounted = match discount {
            Some(Discount::PercentOff(percent)) => subtotal.minus_percent(percent),
            // Shipping is already free; the code validates but changes nothing.
            Some(Discount::FreeShipping) | None => subtotal,
        };

        Totals {
            subtotal,
            shipping,
            discount: Price::from_cents(subtotal.cents() - discounted.cents()),
            total: discounted + shipping,
        }
    }
}
