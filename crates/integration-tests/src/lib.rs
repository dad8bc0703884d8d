//! End-to-end tests for the cart sidebar storefront.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! carrying the session cookie between requests the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cart-sidebar-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use cart_sidebar_storefront::{
    catalog::Catalog, config::StorefrontConfig, middleware::NETWORK_STATUS_HEADER, routes,
    state::AppState,
};
use tower::ServiceExt;

/// Catalog shared by the tests.
pub const TEST_CATALOG: &str = r#"[
    {
        "id": "shirt-m",
        "name": "M",
        "sku": "SHIRT-M",
        "quantityAvailable": 5,
        "pricing": { "price": { "gross": { "amount": "20.00" } } },
        "product": { "id": "shirt", "name": "Shirt" },
        "attributes": [
            { "attribute": { "name": "Size" }, "values": [{ "name": "M" }] }
        ]
    },
    {
        "id": "mug",
        "name": "Default",
        "pricing": { "price": { "gross": { "amount": "8.50" } } },
        "product": { "id": "mug", "name": "Mug" }
    },
    { "id": "preorder", "name": "Default", "product": { "id": "poster", "name": "Poster" } }
]"#;

/// Checkout URL used by the test configuration.
pub const CHECKOUT_URL: &str = "https://checkout.example.com/start";

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The storefront app plus a browser-like cookie jar of one cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the app with the test catalog and default pricing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Build the app with extra configuration variables.
    #[must_use]
    pub fn with_env(extra: &[(&str, &str)]) -> Self {
        let config = StorefrontConfig::from_lookup(|key| {
            extra
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
                .or_else(|| match key {
                    "STOREFRONT_BASE_URL" => Some("http://localhost:3000".to_string()),
                    "CHECKOUT_URL" => Some(CHECKOUT_URL.to_string()),
                    _ => None,
                })
        })
        .unwrap();
        let catalog = Catalog::from_json(TEST_CATALOG).unwrap();

        Self {
            router: routes::app(AppState::new(config, catalog)),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    /// Send a GET request with the client reporting itself offline.
    pub async fn get_offline(&mut self, uri: &str) -> TestResponse {
        self.send(
            Request::get(uri).header(NETWORK_STATUS_HEADER, "offline"),
            Body::empty(),
        )
        .await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(form.to_string()),
        )
        .await
    }

    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
