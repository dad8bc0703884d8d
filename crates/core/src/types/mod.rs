//! Core types for the cart sidebar.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{
    AttributeRef, AttributeValue, CartItem, ProductVariant, SelectedAttribute, Thumbnail,
    VariantPricing, VariantProduct,
};
pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Money, TaxedMoney};
