//! Wishlist commands.

use std::path::Path;

use lantern_core::{ProductId, Shop};

use crate::render::{self, TerminalView};
use crate::store::FileStore;

/// Toggle a product's wishlist membership.
pub fn toggle(shop: &mut Shop<FileStore>, id: ProductId) {
    shop.toggle_wishlist(id, &mut TerminalView);
}

/// List wishlisted products, named from the catalog when it can be read.
pub async fn list(shop: &Shop<FileStore>, catalog_path: &Path) {
    if shop.wishlist().is_empty() {
        render::print_line("Your wishlist is empty");
        return;
    }

    let catalog = match super::load_catalog(catalog_path).await {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            tracing::warn!(error = %e, "Listing wishlist ids only");
            None
        }
    };

    for id in shop.wishlist().iter() {
        match catalog.as_ref().and_then(|catalog| catalog.get(id)) {
            Some(product) => render::print_line(&format!("{id:>4}  {}", product.name)),
            None => render::print_line(&format!("{id:>4}")),
        }
    }
}
