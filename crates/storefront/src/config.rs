//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON
//!   (default: `crates/storefront/content/catalog.json`)
//! - `STOREFRONT_STATIC_DIR` - Static assets (default: `crates/storefront/static`)
//! - `STOREFRONT_TRUST_PROXY` - Key rate limits on `X-Forwarded-For`/`X-Real-IP`
//!   instead of the peer address; only set behind a proxy (default: false)
//! - `SHOP_SHIPPING_FEE` - Flat shipping fee (default: 9.99)
//! - `SHOP_TAX_RATE` - Tax rate as a fraction (default: 0.08)
//! - `UI_TOAST_MS` - Toast display time (default: 3000)
//! - `UI_BUTTON_REVERT_MS` - "Added!" label display time (default: 1000)
//! - `CONTACT_LATENCY_MS` - Simulated contact submission latency (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling (default: 1.0 / 0.0)

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use lantern_core::PricingPolicy;
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
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
    /// Product catalog JSON file
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Trust client IP headers set by a reverse proxy
    pub trust_proxy: bool,
    /// Shipping and tax applied to order summaries
    pub pricing: PricingPolicy,
    /// Delays for transient UI effects
    pub ui: UiTimings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Delays owned by the view layer. None of them touch cart or wishlist state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    /// How long a toast stays on screen
    pub toast: Duration,
    /// How long an add button reads "Added!"
    pub button_revert: Duration,
    /// Simulated latency before a contact message is acknowledged
    pub contact_latency: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            toast: Duration::from_millis(3000),
            button_revert: Duration::from_millis(1000),
            contact_latency: Duration::from_millis(2000),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog_path: PathBuf::from("crates/storefront/content/catalog.json"),
            static_dir: PathBuf::from("crates/storefront/static"),
            trust_proxy: false,
            pricing: PricingPolicy::default(),
            ui: UiTimings::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// a pricing value is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let pricing = PricingPolicy {
            shipping_fee: non_negative(
                "SHOP_SHIPPING_FEE",
                parse_or(
                    "SHOP_SHIPPING_FEE",
                    get_optional_env("SHOP_SHIPPING_FEE"),
                    defaults.pricing.shipping_fee,
                )?,
            )?,
            tax_rate: non_negative(
                "SHOP_TAX_RATE",
                parse_or(
                    "SHOP_TAX_RATE",
                    get_optional_env("SHOP_TAX_RATE"),
                    defaults.pricing.tax_rate,
                )?,
            )?,
        };

        let ui = UiTimings {
            toast: millis_or("UI_TOAST_MS", defaults.ui.toast)?,
            button_revert: millis_or("UI_BUTTON_REVERT_MS", defaults.ui.button_revert)?,
            contact_latency: millis_or("CONTACT_LATENCY_MS", defaults.ui.contact_latency)?,
        };

        Ok(Self {
            host: parse_or(
                "STOREFRONT_HOST",
                get_optional_env("STOREFRONT_HOST"),
                defaults.host,
            )?,
            port: parse_or(
                "STOREFRONT_PORT",
                get_optional_env("STOREFRONT_PORT"),
                defaults.port,
            )?,
            base_url: get_optional_env("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url),
            catalog_path: get_optional_env("STOREFRONT_CATALOG_PATH")
                .map_or(defaults.catalog_path, PathBuf::from),
            static_dir: get_optional_env("STOREFRONT_STATIC_DIR")
                .map_or(defaults.static_dir, PathBuf::from),
            trust_proxy: parse_or(
                "STOREFRONT_TRUST_PROXY",
                get_optional_env("STOREFRONT_TRUST_PROXY"),
                defaults.trust_proxy,
            )?,
            pricing,
            ui,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or(
                "SENTRY_SAMPLE_RATE",
                get_optional_env("SENTRY_SAMPLE_RATE"),
                defaults.sentry_sample_rate,
            )?,
            sentry_traces_sample_rate: parse_or(
                "SENTRY_TRACES_SAMPLE_RATE",
                get_optional_env("SENTRY_TRACES_SAMPLE_RATE"),
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse `raw` if present, otherwise fall back to `default`.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Read a millisecond duration.
fn millis_or(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_or(key, get_optional_env(key), default_ms).map(Duration::from_millis)
}

fn non_negative(key: &str, value: Decimal) -> Result<Decimal, ConfigError> {
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}
