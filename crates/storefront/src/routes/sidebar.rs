//! Cart sidebar route handlers.
//!
//! Every handler answers with a freshly rendered sidebar that HTMX swaps in
//! place of the current one (`hx-swap="outerHTML"`). Mutations also send an
//! `HX-Trigger: cart-updated` header so the header badge refreshes.

use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use cart_sidebar_core::VariantId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{CartSidebar, CartSidebarProps, SIDEBAR_TARGET};
use crate::error::add_breadcrumb;
use crate::middleware::NetworkStatus;
use crate::models::session;
use crate::state::AppState;
use crate::store::{CartSnapshot, CartStoreError};

/// Event name HTMX listeners use to refresh cart fragments.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveLineForm {
    pub variant_id: String,
}

/// Update line form data.
#[derive(Debug, Deserialize)]
pub struct UpdateLineForm {
    pub variant_id: String,
    pub quantity: u32,
}

/// Load the visitor's cart, if they have one that has not expired.
///
/// An expired cart ID is dropped from the session.
pub async fn current_cart(state: &AppState, session: &Session) -> Option<CartSnapshot> {
    let cart_id = session::cart_id(session).await?;

    match state.store().get_cart(&cart_id).await {
        Ok(cart) => Some(cart),
        Err(CartStoreError::CartNotFound(_)) => {
            tracing::debug!(cart_id = %cart_id, "Cart expired");
            session::clear_cart_id(session).await;
            None
        }
        Err(e) => {
            tracing::warn!("Failed to load cart {cart_id}: {e}");
            None
        }
    }
}

/// Render the sidebar for a cart snapshot.
#[must_use]
pub fn render_sidebar(
    state: &AppState,
    cart: Option<&CartSnapshot>,
    show: bool,
    network: NetworkStatus,
) -> CartSidebar {
    CartSidebar::new(&CartSidebarProps {
        items: cart.map(|c| c.items.as_slice()),
        total_price: cart.map(|c| &c.totals.total),
        shipping_taxed_price: cart.and_then(|c| c.totals.shipping.as_ref()),
        promo_taxed_price: cart.and_then(|c| c.totals.discount.as_ref()),
        subtotal_price: cart.map(|c| &c.totals.subtotal),
        show,
        target: SIDEBAR_TARGET,
        network,
        actions: state.actions(),
        messages: state.messages(),
    })
}

/// Open the sidebar (HTMX).
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    network: NetworkStatus,
) -> CartSidebar {
    let cart = if network.is_online() {
        current_cart(&state, &session).await
    } else {
        None
    };

    render_sidebar(&state, cart.as_ref(), true, network)
}

/// Close the sidebar (HTMX).
///
/// Returns the bare anchor element, ready to be opened again.
#[instrument(skip(state))]
pub async fn hide(State(state): State<AppState>, network: NetworkStatus) -> CartSidebar {
    render_sidebar(&state, None, false, network)
}

/// Remove a line and re-render the open sidebar (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    network: NetworkStatus,
    Form(form): Form<RemoveLineForm>,
) -> Response {
    let Some(cart_id) = session::cart_id(&session).await else {
        return render_sidebar(&state, None, true, network).into_response();
    };

    add_breadcrumb("cart", "Remove line", &[("variant_id", form.variant_id.as_str())]);

    let variant_id = VariantId::new(form.variant_id);
    let cart = match state.store().remove_item(&cart_id, &variant_id).await {
        Ok(cart) => Some(cart),
        Err(e) => recover(&state, &session, "remove line from cart", e).await,
    };

    updated(render_sidebar(&state, cart.as_ref(), true, network))
}

/// Change a line's quantity and re-render the open sidebar (HTMX).
///
/// A quantity of zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    network: NetworkStatus,
    Form(form): Form<UpdateLineForm>,
) -> Response {
    let Some(cart_id) = session::cart_id(&session).await else {
        return render_sidebar(&state, None, true, network).into_response();
    };

    let quantity = form.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Update line quantity",
        &[("variant_id", form.variant_id.as_str()), ("quantity", quantity.as_str())],
    );

    let variant_id = VariantId::new(form.variant_id);
    let cart = match state
        .store()
        .update_item(&cart_id, &variant_id, form.quantity)
        .await
    {
        Ok(cart) => Some(cart),
        Err(e) => recover(&state, &session, "update cart line", e).await,
    };

    updated(render_sidebar(&state, cart.as_ref(), true, network))
}

/// Pick the cart to render after a mutation failed.
///
/// An expired cart is routine: it is dropped from the session and the
/// sidebar renders empty.
async fn recover(
    state: &AppState,
    session: &Session,
    action: &str,
    err: CartStoreError,
) -> Option<CartSnapshot> {
    if let CartStoreError::CartNotFound(cart_id) = err {
        tracing::debug!(cart_id = %cart_id, "Cart expired, could not {action}");
        session::clear_cart_id(session).await;
        return None;
    }

    tracing::error!("Failed to {action}: {err}");
    current_cart(state, session).await
}

/// Attach the cart-updated trigger to a response.
fn updated(sidebar: CartSidebar) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        sidebar,
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use tower_sessions::MemoryStore;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::StorefrontConfig;

    /// Records the level of every event.
    #[derive(Clone, Default)]
    struct Levels(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for Levels {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn app_state() -> AppState {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "STOREFRONT_BASE_URL" => Some("http://localhost:3000".to_string()),
            "CHECKOUT_URL" => Some("https://checkout.test/start".to_string()),
            _ => None,
        })
        .unwrap();
        let catalog = Catalog::from_json(
            r#"[{
                "id": "mug",
                "pricing": { "price": { "gross": { "amount": "8.50" } } },
                "product": { "id": "p1", "name": "Mug" }
            }]"#,
        )
        .unwrap();
        AppState::new(config, catalog)
    }

    async fn expired_session() -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session::set_cart_id(&session, "expired").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_expired_cart_renders_empty_without_error() {
        let levels = Levels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        let _guard = tracing::subscriber::set_default(subscriber);
        let state = app_state();

        let session = expired_session().await;
        let form = RemoveLineForm {
            variant_id: "mug".to_string(),
        };
        let response = remove(
            State(state.clone()),
            session.clone(),
            NetworkStatus::Online,
            Form(form),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session::cart_id(&session).await.is_none());

        let session = expired_session().await;
        let form = UpdateLineForm {
            variant_id: "mug".to_string(),
            quantity: 2,
        };
        let response = update(State(state), session.clone(), NetworkStatus::Online, Form(form))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session::cart_id(&session).await.is_none());

        let levels = levels.0.lock().unwrap();
        assert!(levels.contains(&Level::DEBUG));
        assert!(!levels.contains(&Level::ERROR));
    }
}
