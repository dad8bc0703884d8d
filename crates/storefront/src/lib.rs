//! Cart sidebar storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused. The binary in `main.rs` adds
//! Sentry, logging and the listener on top of [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
