//! Shared persisted-state access for the controllers.

use lumina_auth::{AccountDirectory, Session};
use lumina_cart::Cart;
use lumina_orders::Order;
use lumina_storage::{Store, StoreKeys};

/// Handle to the persisted documents every page shares.
///
/// Reads degrade to defaults (empty cart, signed-out, no order) on missing
/// or corrupt documents; writes log on failure but never take the page
/// down.
#[derive(Debug, Clone)]
pub struct SharedState {
    store: Store,
    keys: StoreKeys,
}

impl SharedState {
    pub fn new(store: Store, keys: StoreKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &StoreKeys {
        &self.keys
    }

    pub fn cart(&self) -> Cart {
        self.store.get(&self.keys.cart()).unwrap_or_default()
    }

    pub fn save_cart(&self, cart: &Cart) {
        if let Err(err) = self.store.put(&self.keys.cart(), cart) {
            tracing::error!("failed to save cart: {err:#}");
        }
    }

    pub fn clear_cart(&self) {
        self.store.remove(&self.keys.cart());
    }

    /// The signed-in session, if there is a usable one.
    pub fn session(&self) -> Option<Session> {
        self.store
            .get::<Session>(&self.keys.session())
            .filter(Session::is_valid)
    }

    pub fn save_session(&self, session: &Session) {
        if let Err(err) = self.store.put(&self.keys.session(), session) {
            tracing::error!("failed to save session: {err:#}");
        }
    }

    pub fn clear_session(&self) {
        self.store.remove(&self.keys.session());
    }

    pub fn accounts(&self) -> AccountDirectory {
        self.store.get(&self.keys.accounts()).unwrap_or_default()
    }

    pub fn save_accounts(&self, directory: &AccountDirectory) {
        if let Err(err) = self.store.put(&self.keys.accounts(), directory) {
            tracing::error!("failed to save account directory: {err:#}");
        }
    }

    pub fn order(&self) -> Option<Order> {
        self.store.get(&self.keys.order())
    }

    pub fn save_order(&self, order: &Order) {
        if let Err(err) = self.store.put(&self.keys.order(), order) {
            tracing::error!("failed to save order: {err:#}");
        }
    }
}
