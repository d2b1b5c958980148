//! The header chrome every page shares.

use serde::Serialize;

use crate::state::SharedState;

/// Cart badge and account corner, derived fresh on every page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderViewModel {
    /// Total units in the cart (not distinct lines).
    pub cart_count: u32,
    /// "Sign In", or the signed-in user's display name.
    pub account_label: String,
    pub signed_in: bool,
}

impl HeaderViewModel {
    pub fn build(state: &SharedState) -> Self {
        let cart_count = state.cart().item_count();
        match state.session() {
            Some(session) => Self {
                cart_count,
                account_label: session.display_name().to_string(),
                signed_in: true,
            },
            None => Self {
                cart_count,
                account_label: "Sign In".to_string(),
                signed_in: false,
            },
        }
    }
}
