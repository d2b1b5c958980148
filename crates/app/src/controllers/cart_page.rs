//! The cart page.

use serde::Serialize;

use lumina_cart::{Cart, Discount};
use lumina_core::DomainResult;

use crate::state::SharedState;

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineViewModel {
    pub name: String,
    pub category_label: String,
    pub price_text: String,
    pub line_total_text: String,
    pub quantity: u32,
    pub size: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsViewModel {
    pub subtotal_text: String,
    /// Always "FREE"; shipping costs nothing on any method.
    pub shipping_text: String,
    /// Present only when a discount is applied.
    pub discount_text: Option<String>,
    pub total_text: String,
}

/// Everything the cart page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartViewModel {
    pub lines: Vec<CartLineViewModel>,
    pub empty: bool,
    pub item_count: u32,
    pub totals: TotalsViewModel,
    pub checkout_enabled: bool,
}

/// Why the checkout button refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutGate {
    /// Proceed to the checkout page.
    Proceed,
    /// Cart is empty; stay put.
    EmptyCart,
    /// Show the sign-in prompt modal.
    SignInRequired,
}

/// The cart page: line mutations, discount codes, the checkout gate.
pub struct CartController {
    state: SharedState,
    applied_discount: Option<Discount>,
}

impl CartController {
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            applied_discount: None,
        }
    }

    pub fn view(&self) -> CartViewModel {
        let cart = self.state.cart();
        self.render(&cart)
    }

    pub fn increment(&self, index: usize) -> DomainResult<CartViewModel> {
        self.mutate(|cart| cart.increment(index))
    }

    pub fn decrement(&self, index: usize) -> DomainResult<CartViewModel> {
        self.mutate(|cart| cart.decrement(index))
    }

    pub fn remove(&self, index: usize) -> DomainResult<CartViewModel> {
        self.mutate(|cart| cart.remove(index).map(|_| ()))
    }

    /// Validate a discount code, remember it, and return the flash
    /// message for the notification toast.
    pub fn apply_discount(&mut self, code: &str) -> DomainResult<String> {
        let discount = Discount::lookup(code)?;
        self.applied_discount = Some(discount);
        Ok(discount.applied_message())
    }

    pub fn applied_discount(&self) -> Option<Discount> {
        self.applied_discount
    }

    /// The checkout button: empty carts stay put, guests get the sign-in
    /// prompt, signed-in sessions proceed.
    pub fn begin_checkout(&self) -> CheckoutGate {
        if self.state.cart().is_empty() {
            return CheckoutGate::EmptyCart;
        }
        if self.state.session().is_none() {
            return CheckoutGate::SignInRequired;
        }
        CheckoutGate::Proceed
    }

    fn mutate(
        &self,
        op: impl FnOnce(&mut Cart) -> DomainResult<()>,
    ) -> DomainResult<CartViewModel> {
        let mut cart = self.state.cart();
        op(&mut cart)?;
        self.state.save_cart(&cart);
        Ok(self.render(&cart))
    }

    fn render(&self, cart: &Cart) -> CartViewModel {
        let totals = cart.totals(self.applied_discount);
        CartViewModel {
            lines: cart
                .items()
                .iter()
                .map(|item| CartLineViewModel {
                    name: item.name.clone(),
                    category_label: item
                        .category
                        .as_ref()
                        .map(|c| c.as_str().to_string())
                        .unwrap_or_else(|| "Product".to_string()),
                    price_text: item.price.to_string(),
                    line_total_text: item.line_total().to_string(),
                    quantity: item.quantity,
                    size: item.size.clone(),
                    image: item.image.clone(),
                })
                .collect(),
            empty: cart.is_empty(),
            item_count: cart.item_count(),
            totals: TotalsViewModel {
                subtotal_text: totals.subtotal.to_string(),
                shipping_text: "FREE".to_string(),
                discount_text: (!totals.discount.is_zero())
                    .then(|| totals.discount.to_string()),
                total_text: totals.total.to_string(),
            },
            checkout_enabled: !cart.is_empty(),
        }
    }
}
