//! Command implementations.

pub mod cart;
pub mod catalog;
pub mod wishlist;

use std::path::Path;

use lantern_core::{Catalog, PricingPolicy, Shop};

use crate::store::{FileStore, StoreError};

/// Restore the shop from the storage file.
///
/// # Errors
///
/// Returns an error if the storage file cannot be read.
pub async fn open_shop(path: &Path) -> Result<Shop<FileStore>, StoreError> {
    let store = FileStore::open(path).await?;
    Ok(Shop::load(store, PricingPolicy::default()))
}

/// Write any changes back to the storage file.
///
/// # Errors
///
/// Returns an error if the storage file cannot be written.
pub async fn save_shop(shop: Shop<FileStore>) -> Result<(), StoreError> {
    shop.into_storage().flush().await
}

/// Read the product catalog.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub async fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("failed to read catalog {}: {e}", path.display()))?;
    Ok(Catalog::from_json(&json)?)
}
