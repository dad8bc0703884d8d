//! Client network status.
//!
//! The page script mirrors `navigator.onLine` into an `x-network-status`
//! header on every HTMX request. Requests without the header (plain page
//! loads, crawlers) are treated as online, since they reached the server.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// The HTTP header carrying the client's network status.
pub const NETWORK_STATUS_HEADER: &str = "x-network-status";

/// Whether the client reports itself online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkStatus {
    #[default]
    Online,
    Offline,
}

impl NetworkStatus {
    /// Read the status from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let offline = headers
            .get(NETWORK_STATUS_HEADER)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("offline"));

        if offline { Self::Offline } else { Self::Online }
    }

    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

impl<S> FromRequestParts<S> for NetworkStatus
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
