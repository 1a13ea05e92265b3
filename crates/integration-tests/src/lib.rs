//! Integration tests for Lantern Goods.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lantern-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral port and talks to
//! it over HTTP with a cookie-keeping client, so every [`TestContext`] is
//! one visitor with a fresh session.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart, summary and checkout flows
//! - `storefront_wishlist` - Wishlist toggling and listing
//! - `storefront_catalog` - Product filtering and static assets
//! - `storefront_contact` - Contact form validation and submission

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use lantern_core::Catalog;
use lantern_storefront::config::{StorefrontConfig, UiTimings};
use lantern_storefront::state::AppState;
use reqwest::{Client, StatusCode};

/// The catalog the storefront ships with.
pub const CATALOG_JSON: &str = include_str!("../../storefront/content/catalog.json");

/// Storefront configuration for tests: no simulated contact latency.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        ui: UiTimings {
            contact_latency: Duration::ZERO,
            ..UiTimings::default()
        },
        ..StorefrontConfig::default()
    }
}

/// A running storefront and one visitor's HTTP client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront with [`test_config`].
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Start a storefront with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the catalog is invalid or the server cannot be started.
    pub async fn with_config(config: StorefrontConfig) -> Self {
        let catalog = Catalog::from_json(CATALOG_JSON).expect("bundled catalog is valid");
        let app = lantern_storefront::app(AppState::new(config, catalog));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("storefront server");
        });

        Self {
            client: Self::visitor(),
            base_url: format!("http://{addr}"),
        }
    }

    /// A new client with its own cookie jar (a second visitor).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn visitor() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("build HTTP client")
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`, following redirects, returning status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request");
        let status = response.status();
        (status, response.text().await.expect("response body"))
    }

    /// POST a form to `path`, following the redirect, returning status and
    /// the body of the final page.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request");
        let status = response.status();
        (status, response.text().await.expect("response body"))
    }

    /// Current cart badge count.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not a number.
    pub async fn cart_count(&self) -> u32 {
        let (status, body) = self.get("/cart/count").await;
        assert_eq!(status, StatusCode::OK);
        body.trim().parse().expect("numeric cart count")
    }
}
