//! Application storage keys.
//!
//! Two pages writing under different prefixes is how a cart silently
//! vanishes between them, so the prefix is configuration and every
//! document key derives from the same one.

/// Derives the store keys for one deployment from its key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    prefix: String,
}

impl StoreKeys {
    pub const DEFAULT_PREFIX: &str = "lumina";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The cart document (flat list of cart items).
    pub fn cart(&self) -> String {
        format!("{}_cart", self.prefix)
    }

    /// The signed-in session document.
    pub fn session(&self) -> String {
        format!("{}_user", self.prefix)
    }

    /// The registered-account directory (flat list of accounts).
    pub fn accounts(&self) -> String {
        format!("{}_users_db", self.prefix)
    }

    /// The most recently placed order, read by the confirmation page.
    pub fn order(&self) -> String {
        format!("{}_order", self.prefix)
    }
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_share_the_configured_prefix() {
        let keys = StoreKeys::default();
        assert_eq!(keys.cart(), "lumina_cart");
        assert_eq!(keys.session(), "lumina_user");
        assert_eq!(keys.accounts(), "lumina_users_db");
        assert_eq!(keys.order(), "lumina_order");

        let other = StoreKeys::new("northshop");
        assert_eq!(other.cart(), "northshop_cart");
    }
}
