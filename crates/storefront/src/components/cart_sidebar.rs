//! Cart sidebar component.
//!
//! The sidebar is a slide-over panel anchored to an element on the page. It
//! is rendered from a [`CartSidebarProps`] snapshot and holds no state of its
//! own: every interaction is an HTMX request whose handler mutates the cart
//! store and renders a fresh sidebar in place of the old one.
//!
//! # Content
//!
//! Evaluated in order:
//!
//! 1. Client offline: offline placeholder only
//! 2. No items: empty-cart message with a "continue shopping" action
//! 3. Any item missing its variant or total price: loading indicator
//! 4. Otherwise: one row per item
//!
//! The cost summary footer is shown whenever the client is online and the
//! cart has items, including while items are loading.
//!
//! # Dismissal
//!
//! While shown, a backdrop covers everything outside the panel and hides the
//! sidebar when clicked. The backdrop is only part of the shown markup, so
//! the listener exists exactly as long as the panel is open.

use askama::Template;
use askama_web::WebTemplate;
use cart_sidebar_core::{CartItem, TaxedMoney};

use super::cart_row::{CartRowView, RowActions, RowKind};
use crate::messages::Messages;
use crate::middleware::NetworkStatus;

/// Default anchor element ID.
pub const SIDEBAR_TARGET: &str = "cart-sidebar";

/// Endpoints and links the sidebar's controls point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarActions {
    /// POST endpoint removing a line by variant.
    pub remove_item: String,
    /// POST endpoint setting a line's quantity by variant.
    pub update_item: String,
    /// GET endpoint returning the hidden sidebar.
    pub hide: String,
    /// GET endpoint for the empty-cart "continue shopping" button.
    pub continue_shopping: String,
    /// Link to the cart page.
    pub go_to_cart: String,
    /// Link starting checkout.
    pub proceed_to_checkout: String,
}

impl Default for SidebarActions {
    fn default() -> Self {
        Self {
            remove_item: "/cart/sidebar/remove".to_string(),
            update_item: "/cart/sidebar/update".to_string(),
            hide: "/cart/sidebar/hide".to_string(),
            continue_shopping: "/cart/sidebar/hide".to_string(),
            go_to_cart: "/cart".to_string(),
            proceed_to_checkout: "/checkout".to_string(),
        }
    }
}

/// Inputs to the sidebar.
#[derive(Debug, Clone, Copy)]
pub struct CartSidebarProps<'a> {
    /// Cart lines. `None` when the visitor has no cart.
    pub items: Option<&'a [CartItem]>,
    pub total_price: Option<&'a TaxedMoney>,
    pub shipping_taxed_price: Option<&'a TaxedMoney>,
    pub promo_taxed_price: Option<&'a TaxedMoney>,
    pub subtotal_price: Option<&'a TaxedMoney>,
    /// Whether the panel is open.
    pub show: bool,
    /// ID of the element the sidebar replaces.
    pub target: &'a str,
    pub network: NetworkStatus,
    pub actions: &'a SidebarActions,
    pub messages: &'static Messages,
}

/// Which body the sidebar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    Offline,
    Empty,
    Loading,
    Items,
}

impl ContentState {
    /// Pick the body for the given network status and items.
    #[must_use]
    pub fn resolve(network: NetworkStatus, items: Option<&[CartItem]>) -> Self {
        if !network.is_online() {
            return Self::Offline;
        }
        match items {
            None | Some([]) => Self::Empty,
            Some(items) if has_missing_variants(items) => Self::Loading,
            Some(_) => Self::Items,
        }
    }

    #[must_use]
    pub const fn is_offline(self) -> bool {
        matches!(self, Self::Offline)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Whether any item still lacks its variant or total price.
#[must_use]
pub fn has_missing_variants(items: &[CartItem]) -> bool {
    items.iter().any(|item| !item.is_complete())
}

/// Formatted cost summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartFooter {
    pub subtotal: String,
    pub total: String,
    /// Present only for a non-zero shipping charge.
    pub shipping: Option<String>,
    /// Present only for a non-zero promotion.
    pub discount: Option<String>,
}

impl CartFooter {
    /// Build the footer from its prices, or `None` when the client is
    /// offline or the cart has no items.
    #[must_use]
    pub fn new(
        subtotal: Option<&TaxedMoney>,
        total: Option<&TaxedMoney>,
        shipping: Option<&TaxedMoney>,
        discount: Option<&TaxedMoney>,
        has_items: bool,
        network: NetworkStatus,
    ) -> Option<Self> {
        if !network.is_online() || !has_items {
            return None;
        }

        Some(Self {
            subtotal: display_or_blank(subtotal),
            total: display_or_blank(total),
            shipping: non_zero(shipping).map(TaxedMoney::display),
            discount: non_zero(discount).map(TaxedMoney::display),
        })
    }

    /// Build the footer for a sidebar.
    #[must_use]
    pub fn resolve(props: &CartSidebarProps<'_>) -> Option<Self> {
        Self::new(
            props.subtotal_price,
            props.total_price,
            props.shipping_taxed_price,
            props.promo_taxed_price,
            props.items.is_some_and(|items| !items.is_empty()),
            props.network,
        )
    }
}

fn display_or_blank(price: Option<&TaxedMoney>) -> String {
    price.map(TaxedMoney::display).unwrap_or_default()
}

/// A price that is present and not zero.
fn non_zero(price: Option<&TaxedMoney>) -> Option<&TaxedMoney> {
    price.filter(|p| !p.is_zero())
}

/// Rendered cart sidebar.
#[derive(Debug, Clone, Template, WebTemplate)]
#[template(path = "components/cart_sidebar.html")]
pub struct CartSidebar {
    pub show: bool,
    pub target: String,
    pub state: ContentState,
    pub rows: Vec<CartRowView>,
    pub footer: Option<CartFooter>,
    pub actions: SidebarActions,
    pub msg: &'static Messages,
}

impl CartSidebar {
    /// Derive the sidebar view from its inputs.
    #[must_use]
    pub fn new(props: &CartSidebarProps<'_>) -> Self {
        let state = ContentState::resolve(props.network, props.items);

        let rows = match (state, props.items) {
            (ContentState::Items, Some(items)) => {
                let row_actions = RowActions {
                    remove_url: props.actions.remove_item.clone(),
                    update_url: props.actions.update_item.clone(),
                    hx_target: Some(props.target.to_string()),
                };
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        CartRowView::from_item(RowKind::Condense, index, item, row_actions.clone())
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Self {
            show: props.show,
            target: props.target.to_string(),
            state,
            rows,
            footer: CartFooter::resolve(props),
            actions: props.actions.clone(),
            msg: props.messages,
        }
    }
}
