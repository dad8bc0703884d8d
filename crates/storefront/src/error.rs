//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::CartStoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart store rejected an operation.
    #[error("Cart error: {0}")]
    Cart(#[from] CartStoreError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Cart(err) => match err {
                CartStoreError::CartNotFound(_) | CartStoreError::UnknownVariant(_) => {
                    StatusCode::NOT_FOUND
                }
                CartStoreError::OutOfStock(_) | CartStoreError::Unpriced(_) => {
                    StatusCode::CONFLICT
                }
                CartStoreError::InvalidQuantity => StatusCode::BAD_REQUEST,
            },
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) => "Internal server error".to_string(),
            Self::Cart(CartStoreError::CartNotFound(_)) => "Your cart has expired".to_string(),
            Self::Cart(CartStoreError::UnknownVariant(_)) => "Product not found".to_string(),
            Self::Cart(CartStoreError::OutOfStock(_)) => "This item is out of stock".to_string(),
            Self::Cart(CartStoreError::Unpriced(_)) => {
                "This item is not available for purchase yet".to_string()
            }
            Self::Cart(CartStoreError::InvalidQuantity) => {
                "Quantity must be at least 1".to_string()
            }
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for cart actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use cart_sidebar_core::VariantId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("missing variant_id".to_string());
        assert_eq!(err.to_string(), "Bad request: missing variant_id");

        let err = AppError::from(CartStoreError::UnknownVariant(VariantId::new("v9")));
        assert_eq!(err.to_string(), "Cart error: unknown variant: v9");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(CartStoreError::CartNotFound("c".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CartStoreError::OutOfStock(VariantId::new("v")).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(CartStoreError::Unpriced(VariantId::new("v")).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(CartStoreError::InvalidQuantity.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
