//! Shared page data for templates.

use lantern_core::{Notifier, Product, ProductId, Shop, ShopView};

use crate::models::{Flash, SessionStorage, Toast};
use crate::state::AppState;

/// Data every full page needs: the header badge, the pending toast and the
/// timings `app.js` uses for transient effects.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub cart_count: u32,
    pub toast: Option<Toast>,
    pub toast_ms: u128,
    pub button_revert_ms: u128,
    /// Path of the current page, used to highlight the active nav link.
    pub path: &'static str,
}

impl PageChrome {
    #[must_use]
    pub fn new(state: &AppState, shop: &Shop<SessionStorage>, flash: &Flash, path: &'static str) -> Self {
        let ui = state.ui();
        Self {
            cart_count: shop.total_item_count(),
            toast: flash.toast.clone(),
            toast_ms: ui.toast.as_millis(),
            button_revert_ms: ui.button_revert.as_millis(),
            path,
        }
    }
}

/// A product card on the home or listing page.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub wishlisted: bool,
    /// The add button was just used and should read "Added!".
    pub just_added: bool,
}

/// The visible grid of product cards.
///
/// Acts as the wishlist side of a [`ShopView`]: the shop marks member
/// controls active and ids without a card on the page are ignored.
#[derive(Debug, Default)]
pub struct ProductGrid {
    cards: Vec<ProductCardView>,
}

impl ProductGrid {
    /// Build cards for `products`, syncing wishlist controls from `shop`.
    #[must_use]
    pub fn build<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        shop: &Shop<SessionStorage>,
        added: Option<ProductId>,
    ) -> Vec<ProductCardView> {
        let mut grid = Self {
            cards: products
                .into_iter()
                .map(|product| ProductCardView {
                    id: product.id,
                    name: product.name.clone(),
                    price: product.price.to_string(),
                    category: product.category.clone(),
                    description: product.description.clone(),
                    image: product.image_url(),
                    wishlisted: false,
                    just_added: added == Some(product.id),
                })
                .collect(),
        };
        shop.sync_wishlist_view(&mut grid);
        grid.cards
    }
}

impl Notifier for ProductGrid {
    fn notify(&mut self, _message: &str) {}
}

impl ShopView for ProductGrid {
    fn set_wishlist_control(&mut self, id: ProductId, active: bool) {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == id) {
            card.wishlisted = active;
        }
    }
}

/// Resolve a form's `return_to` to a same-site path.
///
/// Anything that is not an absolute local path (including protocol-relative
/// `//host` URLs) falls back to `default`.
#[must_use]
pub fn safe_return_to(raw: Option<&str>, default: &str) -> String {
    raw.map(str::trim)
        .filter(|path| {
            path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
        })
        .unwrap_or(default)
        .to_owned()
}
