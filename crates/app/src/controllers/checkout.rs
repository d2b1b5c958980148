//! The checkout and order-confirmation pages.

use chrono::Utc;
use serde::Serialize;

use lumina_cart::Discount;
use lumina_core::DomainError;
use lumina_orders::{ContactForm, FieldError, Order, ShippingMethod};

use crate::controllers::cart_page::TotalsViewModel;
use crate::state::SharedState;

/// Why an order could not be placed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderError {
    /// Per-field validation failures, for inline display.
    Contact(Vec<FieldError>),
    /// Empty cart, missing session, storage trouble.
    Domain(DomainError),
}

impl From<DomainError> for PlaceOrderError {
    fn from(err: DomainError) -> Self {
        PlaceOrderError::Domain(err)
    }
}

/// One line of the order summary sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineViewModel {
    pub name: String,
    pub category_label: String,
    pub price_text: String,
    pub quantity: u32,
    pub image: Option<String>,
}

/// The confirmation page for a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationViewModel {
    pub order_number: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub shipping_method_name: String,
    pub lines: Vec<OrderLineViewModel>,
    pub totals: TotalsViewModel,
}

/// Checkout: summary, validation, placing the order, confirmation.
pub struct CheckoutController {
    state: SharedState,
}

impl CheckoutController {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// The order summary shown beside the form (the cart, read-only).
    pub fn summary(&self) -> Vec<OrderLineViewModel> {
        self.state
            .cart()
            .items()
            .iter()
            .map(|item| OrderLineViewModel {
                name: item.name.clone(),
                category_label: item
                    .category
                    .as_ref()
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| "Product".to_string()),
                price_text: item.price.to_string(),
                quantity: item.quantity,
                image: item.image.clone(),
            })
            .collect()
    }

    /// Validate the form, freeze the cart into an order, persist it for
    /// the confirmation page, then clear the cart. Requires a signed-in
    /// session; the cart page's gate enforces the same thing earlier.
    pub fn place_order(
        &self,
        form: &ContactForm,
        shipping_token: &str,
        discount: Option<Discount>,
    ) -> Result<Order, PlaceOrderError> {
        if self.state.session().is_none() {
            return Err(DomainError::Unauthorized.into());
        }

        let contact = form.validate().map_err(PlaceOrderError::Contact)?;
        let method = ShippingMethod::from_token(shipping_token);

        let cart = self.state.cart();
        let order = Order::place(contact, method, &cart, discount, Utc::now())?;

        // Persist the order before the cart is cleared so a failed write
        // never strands the user with neither cart nor confirmation.
        self.state.save_order(&order);
        self.state.clear_cart();
        tracing::info!(order = %order.number, total = %order.totals.total, "order placed");

        Ok(order)
    }

    /// The confirmation view, or `None` when no order was placed (the
    /// page renders its "No Order Found" state).
    pub fn confirmation(&self) -> Option<ConfirmationViewModel> {
        let order = self.state.order()?;
        Some(ConfirmationViewModel {
            order_number: order.number.clone(),
            email: order.contact.email.clone(),
            phone: order.contact.phone.clone(),
            address: order.contact.address.clone(),
            city: order.contact.city.clone(),
            shipping_method_name: order.shipping_method.display_name().to_string(),
            lines: order
                .items
                .iter()
                .map(|item| OrderLineViewModel {
                    name: item.name.clone(),
                    category_label: item
                        .category
                        .as_ref()
                        .map(|c| c.as_str().to_string())
                        .unwrap_or_else(|| "Product".to_string()),
                    price_text: item.price.to_string(),
                    quantity: item.quantity,
                    image: item.image.clone(),
                })
                .collect(),
            totals: TotalsViewModel {
                subtotal_text: order.totals.subtotal.to_string(),
                shipping_text: "FREE".to_string(),
                discount_text: (!order.totals.discount.is_zero())
                    .then(|| order.totals.discount.to_string()),
                total_text: order.totals.total.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_auth::Session;
    use lumina_cart::Cart;
    use lumina_catalog::{CategoryName, Product};
    use lumina_core::{Price, ProductId};
    use lumina_storage::{Store, StoreKeys};

    fn signed_in_state_with_cart() -> SharedState {
        let state = SharedState::new(Store::memory(), StoreKeys::default());
        state.save_session(&Session {
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            login_time: Utc::now(),
            remember_me: false,
        });
        let mut cart = Cart::new();
        cart.add(
            &Product {
                id: ProductId::new("a"),
                name: "Desk Lamp".to_string(),
                category: Some(CategoryName::new("Home & Kitchen")),
                price: Price::from_dollars(24, 99),
                stock: 3,
                image: vec!["lamp.jpg".to_string()],
                description: None,
                sku: None,
                sizes: Vec::new(),
            },
            2,
            None,
        )
        .unwrap();
        state.save_cart(&cart);
        state
    }

    fn valid_form() -> ContactForm {
        ContactForm {
            email: "jane@example.com".to_string(),
            phone: "4165550199".to_string(),
            address: "12 King St W".to_string(),
            city: "Toronto".to_string(),
        }
    }

    #[test]
    fn placing_an_order_clears_the_cart_and_feeds_the_confirmation() {
        let state = signed_in_state_with_cart();
        let controller = CheckoutController::new(state.clone());

        let order = controller.place_order(&valid_form(), "express", None).unwrap();
        assert!(state.cart().is_empty());

        let confirmation = controller.confirmation().unwrap();
        assert_eq!(confirmation.order_number, order.number);
        assert_eq!(confirmation.shipping_method_name, "Express Shipping (FREE)");
        assert_eq!(confirmation.totals.total_text, "$49.98");
        assert_eq!(confirmation.lines.len(), 1);
    }

    #[test]
    fn guests_cannot_place_orders() {
        let state = signed_in_state_with_cart();
        state.clear_session();
        let controller = CheckoutController::new(state.clone());

        let err = controller.place_order(&valid_form(), "standard", None).unwrap_err();
        assert_eq!(err, PlaceOrderError::Domain(DomainError::Unauthorized));
        assert!(!state.cart().is_empty(), "a refused order keeps the cart");
    }

    #[test]
    fn invalid_contact_fields_come_back_keyed_and_keep_the_cart() {
        let state = signed_in_state_with_cart();
        let controller = CheckoutController::new(state.clone());

        let mut form = valid_form();
        form.email = "nope".to_string();
        form.city = String::new();

        match controller.place_order(&form, "standard", None).unwrap_err() {
            PlaceOrderError::Contact(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected contact errors, got {other:?}"),
        }
        assert!(!state.cart().is_empty());
        assert!(controller.confirmation().is_none());
    }

    #[test]
    fn an_empty_cart_is_an_invariant_violation() {
        let state = signed_in_state_with_cart();
        state.clear_cart();
        let controller = CheckoutController::new(state);

        let err = controller.place_order(&valid_form(), "standard", None).unwrap_err();
        assert!(matches!(
            err,
            PlaceOrderError::Domain(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn no_stored_order_means_no_confirmation() {
        let controller =
            CheckoutController::new(SharedState::new(Store::memory(), StoreKeys::default()));
        assert!(controller.confirmation().is_none());
    }
}
