//! User-facing copy for the cart views.
//!
//! Templates read strings from a [`Messages`] catalog instead of hardcoding
//! them, so a translated catalog can be swapped in per request.

/// Message catalog for cart views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub my_cart: &'static str,
    pub close: &'static str,
    pub offline: &'static str,
    pub loading: &'static str,
    pub empty_cart_title: &'static str,
    pub empty_cart_description: &'static str,
    pub continue_shopping: &'static str,
    pub go_to_cart: &'static str,
    pub proceed_to_checkout: &'static str,
    pub subtotal: &'static str,
    pub shipping: &'static str,
    pub discount: &'static str,
    pub total: &'static str,
    pub sku: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub remove: &'static str,
    pub update: &'static str,
}

/// Default (English) catalog.
pub const DEFAULT_MESSAGES: Messages = Messages {
    my_cart: "My Cart",
    close: "Close",
    offline: "OFFLINE :(",
    loading: "Loading",
    empty_cart_title: "Your cart is empty",
    empty_cart_description: "You haven’t added anything to your bag. We’re sure you’ll find something in our store",
    continue_shopping: "Continue shopping",
    go_to_cart: "Go to my cart",
    proceed_to_checkout: "Proceed to Checkout",
    subtotal: "Subtotal",
    shipping: "Shipping",
    discount: "Promo code",
    total: "Total",
    sku: "SKU",
    quantity: "Quantity",
    unit_price: "Price",
    remove: "Remove",
    update: "Update",
};

impl Default for Messages {
    fn default() -> Self {
        DEFAULT_MESSAGES
    }
}
