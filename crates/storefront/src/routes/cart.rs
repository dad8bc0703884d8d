//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Cart IDs are stored in the session and map to carts in the cart store.
//! The update and remove forms on the cart page also work without HTMX and
//! redirect back to the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use cart_sidebar_core::VariantId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::sidebar::{CART_UPDATED_EVENT, RemoveLineForm, UpdateLineForm, current_cart};
use crate::components::{CartFooter, CartRowView, ContentState, RowActions, RowKind};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::messages::Messages;
use crate::middleware::NetworkStatus;
use crate::models::session;
use crate::state::AppState;
use crate::store::{CartSnapshot, CartStoreError};

/// Cart page form endpoints.
const PAGE_UPDATE_URL: &str = "/cart/update";
const PAGE_REMOVE_URL: &str = "/cart/remove";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub variant_id: String,
    pub quantity: Option<u32>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub state: ContentState,
    pub rows: Vec<CartRowView>,
    pub footer: Option<CartFooter>,
    pub count: u32,
    pub shop_url: String,
    pub msg: &'static Messages,
}

impl CartShowTemplate {
    fn new(state: &AppState, cart: Option<&CartSnapshot>) -> Self {
        let network = NetworkStatus::Online;
        let items = cart.map(|c| c.items.as_slice());
        let content = ContentState::resolve(network, items);

        let actions = RowActions {
            remove_url: PAGE_REMOVE_URL.to_string(),
            update_url: PAGE_UPDATE_URL.to_string(),
            hx_target: None,
        };
        let rows = match (content, items) {
            (ContentState::Items, Some(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    CartRowView::from_item(RowKind::Page, index, item, actions.clone())
                })
                .collect(),
            _ => Vec::new(),
        };

        let footer = cart.and_then(|c| {
            CartFooter::new(
                Some(&c.totals.subtotal),
                Some(&c.totals.total),
                c.totals.shipping.as_ref(),
                c.totals.discount.as_ref(),
                !c.items.is_empty(),
                network,
            )
        });

        Self {
            state: content,
            rows,
            footer,
            count: cart.map_or(0, CartSnapshot::total_quantity),
            shop_url: state.config().shop_url.clone(),
            msg: state.messages(),
        }
    }
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Home page. There are no catalog pages, so visitors land on the cart.
pub async fn home() -> Redirect {
    Redirect::to("/cart")
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let cart = current_cart(&state, &session).await;
    CartShowTemplate::new(&state, cart.as_ref())
}

/// Add item to cart (HTMX).
///
/// Creates a new cart if one doesn't exist, or adds to the existing cart.
/// Returns the new count badge with an HTMX trigger so other cart fragments
/// refresh.
///
/// # Errors
///
/// Returns an error if the variant is unknown or sold out, the quantity is
/// zero, or the session cannot be written.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let quantity = form.quantity.unwrap_or(1);
    let variant_id = VariantId::new(form.variant_id);

    let cart_id = match current_cart(&state, &session).await {
        Some(cart) => cart.id,
        None => {
            let cart_id = state.store().create_cart().await;
            session::set_cart_id(&session, &cart_id).await?;
            cart_id
        }
    };

    add_breadcrumb(
        "cart",
        "Add to cart",
        &[("cart_id", cart_id.as_str()), ("variant_id", variant_id.as_str())],
    );

    let cart = state.store().add_item(&cart_id, &variant_id, quantity).await?;

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate {
            count: cart.total_quantity(),
        },
    )
        .into_response())
}

/// Update cart line quantity from the cart page, then return to it.
///
/// # Errors
///
/// Returns an error if the cart store rejects the update.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateLineForm>,
) -> Result<Redirect> {
    if let Some(cart_id) = session::cart_id(&session).await {
        let variant_id = VariantId::new(form.variant_id);
        state
            .store()
            .update_item(&cart_id, &variant_id, form.quantity)
            .await
            .map(Some)
            .or_else(ignore_expired)?;
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart page, then return to it.
///
/// # Errors
///
/// Returns an error if the cart store rejects the removal.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveLineForm>,
) -> Result<Redirect> {
    if let Some(cart_id) = session::cart_id(&session).await {
        let variant_id = VariantId::new(form.variant_id);
        state
            .store()
            .remove_item(&cart_id, &variant_id)
            .await
            .map(Some)
            .or_else(ignore_expired)?;
    }

    Ok(Redirect::to("/cart"))
}

/// An expired cart has nothing to change; the page shows it as empty.
fn ignore_expired(err: CartStoreError) -> Result<Option<CartSnapshot>> {
    match err {
        CartStoreError::CartNotFound(_) => Ok(None),
        other => Err(AppError::from(other)),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> CartCountTemplate {
    let count = current_cart(&state, &session)
        .await
        .map_or(0, |cart| cart.total_quantity());

    CartCountTemplate { count }
}

/// Redirect to the external checkout with the cart ID.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let Some(cart) = current_cart(&state, &session).await else {
        // No cart, redirect to cart page
        return Redirect::to("/cart").into_response();
    };

    if cart.items.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let mut url = state.config().checkout_url.clone();
    url.query_pairs_mut().append_pair("cart", &cart.id);
    Redirect::to(url.as_str()).into_response()
}
