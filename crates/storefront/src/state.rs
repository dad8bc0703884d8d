//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::components::SidebarActions;
use crate::config::StorefrontConfig;
use crate::messages::{DEFAULT_MESSAGES, Messages};
use crate::store::CartStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the cart store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: CartStore,
    actions: SidebarActions,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Variants carts can hold
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let store = CartStore::new(catalog, config.pricing.clone(), config.cart_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                actions: SidebarActions::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn store(&self) -> &CartStore {
        &self.inner.store
    }

    /// Endpoints the sidebar controls point at.
    #[must_use]
    pub fn actions(&self) -> &SidebarActions {
        &self.inner.actions
    }

    /// UI strings.
    #[must_use]
    pub const fn messages(&self) -> &'static Messages {
        &DEFAULT_MESSAGES
    }
}
