//! `lumina-orders` — checkout and order confirmation.
//!
//! Payment is mocked end to end: "placing" an order freezes the cart and
//! its totals into an order document for the confirmation page. The only
//! real logic is contact validation and the order assembly invariants.

pub mod checkout;
pub mod order;

pub use checkout::{ContactDetails, ContactField, ContactForm, FieldError, ShippingMethod};
pub use order::{Order, generate_order_number};
