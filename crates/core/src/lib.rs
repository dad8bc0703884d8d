//! Cart Sidebar Core - Shared types library.
//!
//! This crate provides the types the storefront renders from:
//! - Cart line items with their resolved product variants
//! - Taxed money values and currency codes
//! - String-backed identifiers for lines, variants, products and attributes
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no caching. The cart
//! store in the storefront crate owns and mutates these values; views only
//! read snapshots of them.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, and cart item types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
