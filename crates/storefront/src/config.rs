//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `CHECKOUT_URL` - Checkout endpoint the cart is handed off to
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHOP_URL` - Where "Continue shopping" leads (default: /)
//! - `CATALOG_PATH` - Variant catalog JSON (default: crates/storefront/data/catalog.json)
//! - `CART_CURRENCY` - ISO 4217 currency for cart totals (default: USD)
//! - `CART_SHIPPING_FLAT_RATE` - Shipping charged per cart (default: 0)
//! - `CART_FREE_SHIPPING_THRESHOLD` - Subtotal from which shipping is free
//! - `CART_DISCOUNT_PERCENT` - Storewide promotion applied to the subtotal
//! - `CART_TTL_SECONDS` - Idle lifetime of a cart (default: 7 days)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cart_sidebar_core::CurrencyCode;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default idle lifetime of a cart (7 days).
const DEFAULT_CART_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Where "Proceed to Checkout" hands the cart off to
    pub checkout_url: Url,
    /// Where "Continue shopping" leads from the cart page
    pub shop_url: String,
    /// Variant catalog file
    pub catalog_path: PathBuf,
    /// Cart pricing rules
    pub pricing: PricingConfig,
    /// Idle lifetime of a cart
    pub cart_ttl: Duration,
    /// Sentry DSN for error tracking (contains the project key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Pricing rules the cart store applies when summarizing a cart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PricingConfig {
    /// Currency of all cart totals
    pub currency: CurrencyCode,
    /// Shipping charged per non-empty cart
    pub shipping_flat_rate: Decimal,
    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold: Option<Decimal>,
    /// Storewide promotion, in percent of the subtotal
    pub discount_percent: Option<Decimal>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parsed_or("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parsed_or("STOREFRONT_PORT", "3000")?;
        let base_url = env.required("STOREFRONT_BASE_URL")?;
        let checkout_url = env.required_parsed::<Url>("CHECKOUT_URL")?;
        let shop_url = env.or_default("SHOP_URL", "/");
        let catalog_path = PathBuf::from(env.or_default(
            "CATALOG_PATH",
            "crates/storefront/data/catalog.json",
        ));
        let pricing = PricingConfig {
            currency: env.parsed_or("CART_CURRENCY", "USD")?,
            shipping_flat_rate: env.parsed_or("CART_SHIPPING_FLAT_RATE", "0")?,
            free_shipping_threshold: env.optional_parsed("CART_FREE_SHIPPING_THRESHOLD")?,
            discount_percent: env.optional_parsed("CART_DISCOUNT_PERCENT")?,
        };
        let cart_ttl = Duration::from_secs(
            env.parsed_or("CART_TTL_SECONDS", &DEFAULT_CART_TTL_SECONDS.to_string())?,
        );
        let sentry_dsn = env.optional("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            base_url,
            checkout_url,
            shop_url,
            catalog_path,
            pricing,
            cart_ttl,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Typed access over a key lookup.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable. Empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn required_parsed<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        parse(key, &self.required(key)?)
    }

    fn parsed_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        parse(key, &self.or_default(key, default))
    }

    fn optional_parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map(|value| parse(key, &value)).transpose()
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
