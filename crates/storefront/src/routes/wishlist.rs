//! Wishlist route handlers.

use axum::{Form, extract::State, response::Redirect};
use lantern_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::ShopSession;
use crate::routes::page::safe_return_to;
use crate::state::AppState;

/// Toggle wishlist form data.
#[derive(Debug, Deserialize)]
pub struct ToggleWishlistForm {
    pub id: ProductId,
    pub return_to: Option<String>,
}

/// Add the product to the wishlist, or remove it if already there.
#[instrument(skip(state, shop))]
pub async fn toggle(
    State(state): State<AppState>,
    mut shop: ShopSession,
    Form(form): Form<ToggleWishlistForm>,
) -> Result<Redirect> {
    if state.catalog().get(form.id).is_none() {
        return Err(AppError::NotFound(format!("product {}", form.id)));
    }

    let active = shop.apply(|shop, view| shop.toggle_wishlist(form.id, view));
    add_breadcrumb(
        "wishlist",
        if active {
            "Added to wishlist"
        } else {
            "Removed from wishlist"
        },
        Some(&[("product_id", form.id.to_string().as_str())]),
    );
    shop.commit().await?;

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/products",
    )))
}
