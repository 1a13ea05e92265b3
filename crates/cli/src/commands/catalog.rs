//! Catalog commands.

use std::path::Path;

use lantern_core::{ProductFilter, Shop};

use crate::render;
use crate::store::FileStore;

/// List catalog products matching the filters.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn list(
    shop: &Shop<FileStore>,
    catalog_path: &Path,
    category: Option<String>,
    search: Option<String>,
    wishlist_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::load_catalog(catalog_path).await?;
    let filter = ProductFilter {
        category,
        search,
        wishlist_only,
    };
    render::print_products(catalog.filter(&filter, shop.wishlist()));
    Ok(())
}
