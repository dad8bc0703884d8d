//! In-memory cart store.
//!
//! # Architecture
//!
//! - Carts are keyed by an opaque cart ID kept in the visitor's session
//! - Storage is a `moka` cache with a time-to-idle, so abandoned carts expire
//! - Each cart sits behind its own `tokio` mutex; mutations on one cart are
//!   serialized, different carts never contend
//! - Lines store only variant ID and quantity; variant data and prices are
//!   resolved against the [`Catalog`] every time a snapshot is taken
//!
//! Views never see the stored representation, only [`CartSnapshot`]s.

mod pricing;

pub use pricing::{CartTotals, summarize};

use std::sync::Arc;
use std::time::Duration;

use cart_sidebar_core::{CartItem, CartLineId, VariantId};
use moka::future::Cache;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::PricingConfig;

/// Maximum number of carts held in memory.
const MAX_CARTS: u64 = 100_000;

/// Errors returned by cart mutations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The cart expired or never existed.
    #[error("cart not found: {0}")]
    CartNotFound(String),

    /// The variant is not in the catalog.
    #[error("unknown variant: {0}")]
    UnknownVariant(VariantId),

    /// The variant has no stock left.
    #[error("variant out of stock: {0}")]
    OutOfStock(VariantId),

    /// The variant has no price and cannot be sold yet.
    #[error("variant has no price: {0}")]
    Unpriced(VariantId),

    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// A read-only view of a cart at one point in time.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    /// Cart ID.
    pub id: String,
    /// Lines with resolved variants and totals.
    pub items: Vec<CartItem>,
    /// Aggregate prices.
    pub totals: CartTotals,
}

impl CartSnapshot {
    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[derive(Debug)]
struct StoredLine {
    id: CartLineId,
    variant_id: VariantId,
    quantity: u32,
}

#[derive(Debug, Default)]
struct StoredCart {
    lines: Vec<StoredLine>,
}

/// Cart storage shared by all request handlers.
pub struct CartStore {
    carts: Cache<String, Arc<Mutex<StoredCart>>>,
    catalog: Arc<Catalog>,
    pricing: PricingConfig,
}

impl CartStore {
    /// Create a store resolving lines against `catalog`.
    ///
    /// Carts untouched for `ttl` are evicted.
    #[must_use]
    pub fn new(catalog: Catalog, pricing: PricingConfig, ttl: Duration) -> Self {
        let carts = Cache::builder()
            .max_capacity(MAX_CARTS)
            .time_to_idle(ttl)
            .build();

        Self {
            carts,
            catalog: Arc::new(catalog),
            pricing,
        }
    }

    /// Create an empty cart and return its ID.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.carts
            .insert(id.clone(), Arc::new(Mutex::new(StoredCart::default())))
            .await;
        debug!(cart_id = %id, "Cart created");
        id
    }

    /// Get a snapshot of a cart.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError::CartNotFound` if the cart expired.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<CartSnapshot, CartStoreError> {
        let cart = self.cart(cart_id).await?;
        let cart = cart.lock().await;
        Ok(self.snapshot(cart_id, &cart))
    }

    /// Add units of a variant, merging with an existing line for it.
    ///
    /// The resulting line quantity is capped at the variant's stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is missing, the quantity is zero, or the
    /// variant is unknown, unpriced or out of stock.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        cart_id: &str,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartStoreError> {
        if quantity == 0 {
            return Err(CartStoreError::InvalidQuantity);
        }
        let variant = self
            .catalog
            .variant(variant_id)
            .ok_or_else(|| CartStoreError::UnknownVariant(variant_id.clone()))?;
        if variant.unit_price().is_none() {
            return Err(CartStoreError::Unpriced(variant_id.clone()));
        }
        if variant.quantity_available == Some(0) {
            return Err(CartStoreError::OutOfStock(variant_id.clone()));
        }

        let cart = self.cart(cart_id).await?;
        let mut cart = cart.lock().await;

        let merged = cart
            .lines
            .iter_mut()
            .find(|l| &l.variant_id == variant_id)
            .map(|line| {
                line.quantity = clamp_quantity(
                    line.quantity.saturating_add(quantity),
                    variant.quantity_available,
                );
            })
            .is_some();

        if !merged {
            cart.lines.push(StoredLine {
                id: CartLineId::new(Uuid::new_v4().to_string()),
                variant_id: variant_id.clone(),
                quantity: clamp_quantity(quantity, variant.quantity_available),
            });
        }

        Ok(self.snapshot(cart_id, &cart))
    }

    /// Set the quantity of the line holding `variant_id`.
    ///
    /// Zero removes the line. Quantities above stock are capped. Updating a
    /// variant that is not in the cart leaves the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError::CartNotFound` if the cart expired.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        cart_id: &str,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartStoreError> {
        let available = self
            .catalog
            .variant(variant_id)
            .and_then(|v| v.quantity_available);

        let cart = self.cart(cart_id).await?;
        let mut cart = cart.lock().await;

        let quantity = clamp_quantity(quantity, available);
        if quantity == 0 {
            cart.lines.retain(|l| &l.variant_id != variant_id);
        } else if let Some(line) = cart.lines.iter_mut().find(|l| &l.variant_id == variant_id) {
            line.quantity = quantity;
        }

        Ok(self.snapshot(cart_id, &cart))
    }

    /// Remove the line holding `variant_id`. Removing a missing line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError::CartNotFound` if the cart expired.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        cart_id: &str,
        variant_id: &VariantId,
    ) -> Result<CartSnapshot, CartStoreError> {
        let cart = self.cart(cart_id).await?;
        let mut cart = cart.lock().await;
        cart.lines.retain(|l| &l.variant_id != variant_id);
        Ok(self.snapshot(cart_id, &cart))
    }

    async fn cart(&self, cart_id: &str) -> Result<Arc<Mutex<StoredCart>>, CartStoreError> {
        self.carts
            .get(cart_id)
            .await
            .ok_or_else(|| CartStoreError::CartNotFound(cart_id.to_string()))
    }

    /// Resolve stored lines against the catalog and price the cart.
    fn snapshot(&self, cart_id: &str, cart: &StoredCart) -> CartSnapshot {
        let items: Vec<CartItem> = cart
            .lines
            .iter()
            .map(|line| {
                let variant = self.catalog.variant(&line.variant_id).cloned();
                let total_price = variant
                    .as_ref()
                    .and_then(|v| v.unit_price())
                    .map(|unit| unit.times(line.quantity));
                CartItem {
                    id: Some(line.id.clone()),
                    variant,
                    quantity: line.quantity,
                    total_price,
                }
            })
            .collect();

        let totals = summarize(&self.pricing, &items);

        CartSnapshot {
            id: cart_id.to_string(),
            items,
            totals,
        }
    }
}

/// Cap a requested quantity at the available stock, when stock is tracked.
#[must_use]
pub fn clamp_quantity(requested: u32, available: Option<u32>) -> u32 {
    available.map_or(requested, |stock| requested.min(stock))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn store() -> CartStore {
        let catalog = Catalog::from_json(
            r#"[
                {
                    "id": "shirt-m",
                    "name": "M",
                    "quantityAvailable": 3,
                    "pricing": { "price": { "gross": { "amount": "20.00" } } },
                    "product": { "id": "p1", "name": "Shirt" }
                },
                {
                    "id": "mug",
                    "name": "Default",
                    "pricing": { "price": { "gross": { "amount": "8.50" } } },
                    "product": { "id": "p2", "name": "Mug" }
                },
                { "id": "preorder", "name": "Default", "product": { "id": "p3", "name": "Hat" } },
                { "id": "sold-out", "quantityAvailable": 0 }
            ]"#,
        )
        .unwrap();
        CartStore::new(
            catalog,
            PricingConfig::default(),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_missing_cart() {
        let store = store();
        let err = store.get_cart("nope").await.unwrap_err();
        assert!(matches!(err, CartStoreError::CartNotFound(_)));
    }

    #[tokio::test]
    async fn test_add_merges_and_caps_at_stock() {
        let store = store();
        let cart_id = store.create_cart().await;
        let shirt = VariantId::new("shirt-m");

        store.add_item(&cart_id, &shirt, 2).await.unwrap();
        let cart = store.add_item(&cart_id, &shirt, 2).await.unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(
            cart.items[0].total_price.map(|t| t.gross.amount),
            Some(Decimal::from(60))
        );
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let store = store();
        let cart_id = store.create_cart().await;

        assert!(matches!(
            store.add_item(&cart_id, &VariantId::new("mug"), 0).await,
            Err(CartStoreError::InvalidQuantity)
        ));
        assert!(matches!(
            store.add_item(&cart_id, &VariantId::new("ghost"), 1).await,
            Err(CartStoreError::UnknownVariant(_))
        ));
        assert!(matches!(
            store.add_item(&cart_id, &VariantId::new("sold-out"), 1).await,
            Err(CartStoreError::OutOfStock(_))
        ));
    }

    #[tokio::test]
    async fn test_unpriced_variant_is_rejected() {
        let store = store();
        let cart_id = store.create_cart().await;
        store.add_item(&cart_id, &VariantId::new("mug"), 1).await.unwrap();

        let err = store
            .add_item(&cart_id, &VariantId::new("preorder"), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, CartStoreError::Unpriced(id) if id.as_str() == "preorder"));

        // The cart keeps only complete lines
        let cart = store.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert!(cart.items.iter().all(CartItem::is_complete));
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = store();
        let cart_id = store.create_cart().await;
        let mug = VariantId::new("mug");
        let shirt = VariantId::new("shirt-m");

        store.add_item(&cart_id, &mug, 1).await.unwrap();
        store.add_item(&cart_id, &shirt, 1).await.unwrap();

        let cart = store.update_item(&cart_id, &mug, 4).await.unwrap();
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.totals.subtotal.gross.amount, Decimal::from(54));

        let cart = store.update_item(&cart_id, &shirt, 10).await.unwrap();
        assert_eq!(cart.items[1].quantity, 3);

        let cart = store.update_item(&cart_id, &shirt, 0).await.unwrap();
        assert_eq!(cart.items.len(), 1);

        let cart = store.remove_item(&cart_id, &mug).await.unwrap();
        assert!(cart.items.is_empty());

        // Removing again is harmless
        let cart = store.remove_item(&cart_id, &mug).await.unwrap();
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn test_line_ids_are_stable() {
        let store = store();
        let cart_id = store.create_cart().await;
        let mug = VariantId::new("mug");

        let first = store.add_item(&cart_id, &mug, 1).await.unwrap();
        let second = store.update_item(&cart_id, &mug, 2).await.unwrap();
        assert_eq!(first.items[0].id, second.items[0].id);
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(7, None), 7);
        assert_eq!(clamp_quantity(7, Some(5)), 5);
        assert_eq!(clamp_quantity(2, Some(5)), 2);
    }
}
