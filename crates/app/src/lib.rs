//! `lumina-app` — the storefront wired together.
//!
//! [`Storefront::open`] loads the catalog snapshot once, opens the local
//! document store, and hands out one controller per page. Controllers
//! share persisted state through the store and derive view models on
//! demand; nothing here renders.

pub mod config;
pub mod controllers;
pub mod header;
pub mod state;
pub mod views;

use std::rc::Rc;

use lumina_catalog::Catalog;
use lumina_loader::{ReviewDirectory, SourceFailure, load_snapshot};
use lumina_storage::{FileStore, Store, StoreKeys};

pub use config::StoreConfig;
pub use controllers::{
    AccountController, CartController, CatalogController, CheckoutController, HomeController,
    ProductDetailController,
};
pub use header::HeaderViewModel;
pub use state::SharedState;

/// One open storefront session: the loaded snapshot plus the store.
pub struct Storefront {
    config: StoreConfig,
    catalog: Rc<Catalog>,
    reviews: Rc<ReviewDirectory>,
    load_failures: Vec<SourceFailure>,
    state: SharedState,
}

impl Storefront {
    /// Open the storefront with a file-backed store under the OS app
    /// data directory. Initializes tracing and loads the snapshot; a
    /// broken snapshot opens an empty (flagged) storefront rather than
    /// failing.
    pub fn open(config: StoreConfig) -> Storefront {
        lumina_observability::init();
        let store = match FileStore::in_app_data_dir(&config.key_prefix) {
            Ok(backend) => Store::new(backend),
            Err(err) => {
                tracing::warn!("app data directory unavailable, using in-memory store: {err:#}");
                Store::memory()
            }
        };
        Self::open_with_store(config, store)
    }

    /// Open against an explicit store backend (tests use the in-memory
    /// one).
    pub fn open_with_store(config: StoreConfig, store: Store) -> Storefront {
        let load = load_snapshot(&config.data_dir);
        let reviews = ReviewDirectory::load(&config.data_dir);
        let keys = StoreKeys::new(&config.key_prefix);

        Storefront {
            state: SharedState::new(store, keys),
            catalog: Rc::new(load.catalog),
            reviews: Rc::new(reviews),
            load_failures: load.failures,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Category sources skipped during the snapshot load.
    pub fn load_failures(&self) -> &[SourceFailure] {
        &self.load_failures
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// The shared header chrome, derived fresh.
    pub fn header(&self) -> HeaderViewModel {
        HeaderViewModel::build(&self.state)
    }

    pub fn home_page(&self) -> HomeController {
        HomeController::new(Rc::clone(&self.catalog))
    }

    pub fn catalog_page(&self) -> CatalogController {
        CatalogController::new(Rc::clone(&self.catalog), self.config.page_size)
    }

    pub fn product_detail_page(&self) -> ProductDetailController {
        ProductDetailController::new(
            Rc::clone(&self.catalog),
            Rc::clone(&self.reviews),
            self.state.clone(),
        )
    }

    pub fn cart_page(&self) -> CartController {
        CartController::new(self.state.clone())
    }

    pub fn account_page(&self) -> AccountController {
        AccountController::new(self.state.clone())
    }

    pub fn checkout_page(&self) -> CheckoutController {
        CheckoutController::new(self.state.clone())
    }
}
