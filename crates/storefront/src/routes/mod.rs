//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home (redirects to /cart)
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (redirects to /cart)
//! POST /cart/remove            - Remove line (redirects to /cart)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Cart sidebar (HTMX fragments, swapped with outerHTML)
//! GET  /cart/sidebar           - Open sidebar
//! GET  /cart/sidebar/hide      - Close sidebar
//! POST /cart/sidebar/update    - Update quantity, re-render sidebar
//! POST /cart/sidebar/remove    - Remove line, re-render sidebar
//!
//! # Checkout
//! GET  /checkout               - Redirect to external checkout
//! ```

pub mod cart;
pub mod sidebar;

use axum::{
    Router,
    extract::Request,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .nest("/sidebar", sidebar_routes())
}

/// Create the sidebar routes router.
pub fn sidebar_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sidebar::show))
        .route("/hide", get(sidebar::hide))
        .route("/update", post(sidebar::update))
        .route("/remove", post(sidebar::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout redirect
        .route("/checkout", get(cart::checkout))
}

/// Build the full application: routes, static files, sessions and tracing.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
