//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the request span)
//! 4. Session layer (tower-sessions, in-memory)
//!
//! [`NetworkStatus`] is an extractor, not a layer.

pub mod network_status;
pub mod request_id;
pub mod session;

pub use network_status::{NETWORK_STATUS_HEADER, NetworkStatus};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::create_session_layer;
