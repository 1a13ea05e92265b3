//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use lantern_core::{Catalog, CatalogError, PricingPolicy};

use crate::config::{StorefrontConfig, UiTimings};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    ReadCatalog {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    InvalidCatalog {
        path: PathBuf,
        source: CatalogError,
    },
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds only read-only data: each visitor's
/// cart and wishlist live in their own session, never here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Create the state, reading the catalog from `config.catalog_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file is missing or invalid.
    pub async fn load(config: StorefrontConfig) -> Result<Self, StateError> {
        let path = config.catalog_path.clone();
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| StateError::ReadCatalog {
                path: path.clone(),
                source,
            })?;
        let catalog =
            Catalog::from_json(&json).map_err(|source| StateError::InvalidCatalog { path, source })?;

        tracing::info!(products = catalog.products().len(), "Catalog loaded");
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Shipping and tax policy.
    #[must_use]
    pub fn pricing(&self) -> PricingPolicy {
        self.inner.config.pricing
    }

    /// UI effect delays.
    #[must_use]
    pub fn ui(&self) -> UiTimings {
        self.inner.config.ui
    }
}
