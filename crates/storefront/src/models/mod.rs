//! Domain models for storefront.
//!
//! The storefront keeps no persistent models of its own: carts live in the
//! cart store and only the cart ID is kept in the visitor's session.

pub mod session;

