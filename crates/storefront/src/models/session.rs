//! Session-related types.
//!
//! The session maps a visitor to their cart in the cart store.

use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Key for storing the cart ID.
    pub const CART_ID: &str = "cart_id";
}

/// Get the cart ID from the session.
pub async fn cart_id(session: &Session) -> Option<String> {
    session.get::<String>(keys::CART_ID).await.ok().flatten()
}

/// Set the cart ID in the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn set_cart_id(
    session: &Session,
    cart_id: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART_ID, cart_id).await
}

/// Forget the cart, e.g. after it expired from the store.
pub async fn clear_cart_id(session: &Session) {
    if let Err(e) = session.remove::<String>(keys::CART_ID).await {
        tracing::warn!("Failed to clear cart ID from session: {e}");
    }
}
