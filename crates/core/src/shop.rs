//! The cart/wishlist state manager.
//!
//! A [`Shop`] owns the cart, the wishlist and the storage they are mirrored
//! into. It is built once per session from whatever the storage holds, and
//! every mutator writes the full collection back before returning. Callers
//! pass the view to notify explicitly; nothing here reaches for ambient
//! state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, LineItem, QuantityChange};
use crate::storage::{CART_KEY, KeyValueStore, WISHLIST_KEY, load_json, save_json};
use crate::summary::{OrderSummary, PricingPolicy};
use crate::types::{Price, ProductId};
use crate::view::{Confirm, ShopView};
use crate::wishlist::Wishlist;

/// Shopper-facing messages.
pub mod messages {
    pub const ITEM_REMOVED: &str = "Item removed from cart";
    pub const CART_EMPTY: &str = "Your cart is empty!";
    pub const ORDER_PLACED: &str = "Order placed successfully! Thank you for your purchase.";
    pub const WISHLIST_ADDED: &str = "Added to wishlist!";
    pub const WISHLIST_REMOVED: &str = "Removed from wishlist";

    /// Confirmation after adding a product.
    #[must_use]
    pub fn item_added(name: &str) -> String {
        format!("{name} added to cart!")
    }

    /// Question asked before an order is placed.
    #[must_use]
    pub fn checkout_prompt(total: &str) -> String {
        format!("Proceed to checkout for {total}?")
    }
}

/// Checkout was refused before any confirmation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
}

/// How a checkout attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// The shopper accepted; the cart was cleared.
    Placed { summary: OrderSummary },
    /// The shopper declined; nothing changed.
    Cancelled,
}

/// Cart and wishlist state mirrored into a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct Shop<S> {
    storage: S,
    pricing: PricingPolicy,
    cart: Cart,
    wishlist: Wishlist,
}

impl<S: KeyValueStore> Shop<S> {
    /// Restore the cart and wishlist from `storage`.
    ///
    /// Missing or unreadable entries start out empty.
    pub fn load(storage: S, pricing: PricingPolicy) -> Self {
        let cart = load_json::<Vec<LineItem>>(&storage, CART_KEY)
            .map(Cart::from_items)
            .unwrap_or_default();
        let wishlist = load_json::<Wishlist>(&storage, WISHLIST_KEY).unwrap_or_default();

        tracing::debug!(
            lines = cart.len(),
            wishlist = wishlist.len(),
            "Shop state restored"
        );

        Self {
            storage,
            pricing,
            cart,
            wishlist,
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product, returning its new quantity.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Price,
        image: Option<&str>,
        view: &mut impl ShopView,
    ) -> u32 {
        let quantity = self.cart.add(id, name, unit_price, image);
        self.persist_cart();
        tracing::debug!(product_id = %id, quantity, "Added to cart");

        view.refresh_cart_count(self.total_item_count());
        view.mark_added(id);
        view.notify(&messages::item_added(name));
        quantity
    }

    /// Remove the line for `id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: ProductId, view: &mut impl ShopView) -> bool {
        if !self.cart.remove(id) {
            return false;
        }
        self.persist_cart();
        tracing::debug!(product_id = %id, "Removed from cart");

        self.refresh_cart(view);
        view.notify(messages::ITEM_REMOVED);
        true
    }

    /// Add `delta` to the quantity of `id`.
    ///
    /// Reaching zero or below removes the line exactly like
    /// [`Shop::remove_item`]; a non-positive quantity is never stored.
    pub fn change_quantity(
        &mut self,
        id: ProductId,
        delta: i32,
        view: &mut impl ShopView,
    ) -> QuantityChange {
        let change = self.cart.change_quantity(id, delta);
        match change {
            QuantityChange::Missing => {}
            QuantityChange::Updated(quantity) => {
                self.persist_cart();
                tracing::debug!(product_id = %id, quantity, "Cart quantity changed");
                self.refresh_cart(view);
            }
            QuantityChange::Removed => {
                self.persist_cart();
                tracing::debug!(product_id = %id, "Removed from cart");
                self.refresh_cart(view);
                view.notify(messages::ITEM_REMOVED);
            }
        }
        change
    }

    /// Current order summary. Pure.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.pricing.summarize(&self.cart)
    }

    /// Sum of all quantities in the cart.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// The question [`Shop::checkout`] will ask, or `None` for an empty cart.
    #[must_use]
    pub fn checkout_prompt(&self) -> Option<String> {
        if self.cart.is_empty() {
            None
        } else {
            Some(messages::checkout_prompt(&self.summary().total_display()))
        }
    }

    /// Place the order after confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] (after rejecting through the
    /// view) when there is nothing to buy. Storage is untouched in that case.
    pub fn checkout(
        &mut self,
        view: &mut impl ShopView,
        confirm: &mut impl Confirm,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let Some(prompt) = self.checkout_prompt() else {
            view.reject(messages::CART_EMPTY);
            return Err(CheckoutError::EmptyCart);
        };

        let summary = self.summary();
        if !confirm.confirm(&prompt) {
            tracing::debug!("Checkout cancelled");
            return Ok(CheckoutOutcome::Cancelled);
        }

        self.cart.clear();
        self.persist_cart();
        tracing::info!(total = %summary.total, "Order placed");

        self.refresh_cart(view);
        view.notify(messages::ORDER_PLACED);
        Ok(CheckoutOutcome::Placed { summary })
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Flip wishlist membership of `id`, returning the new membership.
    pub fn toggle_wishlist(&mut self, id: ProductId, view: &mut impl ShopView) -> bool {
        let active = self.wishlist.toggle(id);
        save_json(&mut self.storage, WISHLIST_KEY, &self.wishlist);
        tracing::debug!(product_id = %id, active, "Wishlist toggled");

        view.set_wishlist_control(id, active);
        view.notify(if active {
            messages::WISHLIST_ADDED
        } else {
            messages::WISHLIST_REMOVED
        });
        active
    }

    #[must_use]
    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    /// Activate the control of every wishlisted product the view shows.
    pub fn sync_wishlist_view(&self, view: &mut impl ShopView) {
        for id in self.wishlist.iter() {
            view.set_wishlist_control(id, true);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub const fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, e.g. to flush it.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_cart(&mut self) {
        save_json(&mut self.storage, CART_KEY, &self.cart);
    }

    fn refresh_cart(&self, view: &mut impl ShopView) {
        view.refresh_cart_count(self.total_item_count());
        view.refresh_cart_items(&self.cart, &self.summary());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::view::Notifier;

    #[derive(Default)]
    struct RecordingView {
        messages: Vec<String>,
        rejections: Vec<String>,
        count: Option<u32>,
        listing_refreshes: usize,
        added: Vec<ProductId>,
        controls: Vec<(ProductId, bool)>,
    }

    impl Notifier for RecordingView {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_owned());
        }

        fn reject(&mut self, message: &str) {
            self.rejections.push(message.to_owned());
        }
    }

    impl ShopView for RecordingView {
        fn refresh_cart_count(&mut self, count: u32) {
            self.count = Some(count);
        }

        fn refresh_cart_items(&mut self, _cart: &Cart, _summary: &OrderSummary) {
            self.listing_refreshes += 1;
        }

        fn mark_added(&mut self, id: ProductId) {
            self.added.push(id);
        }

        fn set_wishlist_control(&mut self, id: ProductId, active: bool) {
            self.controls.push((id, active));
        }
    }

    fn shop() -> Shop<MemoryStore> {
        Shop::load(MemoryStore::new(), PricingPolicy::default())
    }

    fn add_widget(shop: &mut Shop<MemoryStore>, view: &mut RecordingView) -> u32 {
        shop.add_item(
            ProductId::new(1),
            "Widget",
            Price::from_cents(1000),
            None,
            view,
        )
    }

    fn stored_cart(shop: &Shop<MemoryStore>) -> serde_json::Value {
        serde_json::from_str(&shop.storage().get_item(CART_KEY).unwrap()).unwrap()
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_panicking() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        let huge = Price::new(Decimal::MAX);

        shop.add_item(ProductId::new(1), "Huge", huge, None, &mut view);
        shop.add_item(ProductId::new(1), "Huge", huge, None, &mut view);
        assert_eq!(
            shop.change_quantity(ProductId::new(1), 1, &mut view),
            QuantityChange::Updated(3)
        );
        assert_eq!(view.count, Some(3));
        let summary = shop.summary();
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.total, Decimal::MAX);
        assert!(summary.total_display().starts_with('$'));

        // A reload of the stored line stays usable.
        let reloaded = Shop::load(shop.into_storage(), PricingPolicy::default());
        assert_eq!(reloaded.summary().total, Decimal::MAX);
    }

    #[test]
    fn test_add_twice_then_summary() {
        let mut shop = shop();
        let mut view = RecordingView::default();

        assert_eq!(add_widget(&mut shop, &mut view), 1);
        assert_eq!(add_widget(&mut shop, &mut view), 2);

        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.total_item_count(), 2);
        assert_eq!(view.count, Some(2));
        assert_eq!(view.added, vec![ProductId::new(1); 2]);
        assert_eq!(view.messages.last().unwrap(), "Widget added to cart!");

        let summary = shop.summary();
        assert_eq!(summary.subtotal, Decimal::new(2000, 2));
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.tax, Decimal::new(160, 2));
        assert_eq!(summary.total, Decimal::new(3159, 2));

        let stored = stored_cart(&shop);
        assert_eq!(stored[0]["quantity"], 2);
        assert_eq!(stored[0]["price"], 10.0);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        add_widget(&mut shop, &mut view);
        add_widget(&mut shop, &mut view);

        let change = shop.change_quantity(ProductId::new(1), -2, &mut view);

        assert_eq!(change, QuantityChange::Removed);
        assert!(shop.cart().is_empty());
        assert_eq!(stored_cart(&shop), serde_json::json!([]));
        assert_eq!(view.count, Some(0));
        assert_eq!(view.messages.last().unwrap(), messages::ITEM_REMOVED);
    }

    #[test]
    fn test_change_quantity_sequences_never_store_non_positive() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        add_widget(&mut shop, &mut view);

        for delta in [3, -1, -2, 5, -4, -1, 2, -7, 1] {
            shop.change_quantity(ProductId::new(1), delta, &mut view);
            for line in stored_cart(&shop).as_array().unwrap() {
                assert!(line["quantity"].as_u64().unwrap() >= 1);
            }
            assert!(shop.cart().items().iter().all(|item| item.quantity >= 1));
        }
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut shop = shop();
        let mut view = RecordingView::default();

        assert!(!shop.remove_item(ProductId::new(9), &mut view));
        assert_eq!(
            shop.change_quantity(ProductId::new(9), 1, &mut view),
            QuantityChange::Missing
        );
        assert!(shop.storage().get_item(CART_KEY).is_none());
        assert!(view.messages.is_empty());
    }

    #[test]
    fn test_remove_item_refreshes_and_notifies() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        add_widget(&mut shop, &mut view);

        assert!(shop.remove_item(ProductId::new(1), &mut view));
        assert_eq!(view.listing_refreshes, 1);
        assert_eq!(view.messages.last().unwrap(), "Item removed from cart");
    }

    #[test]
    fn test_round_trip_through_storage() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        add_widget(&mut shop, &mut view);
        shop.add_item(
            ProductId::new(2),
            "Gadget",
            Price::from_cents(1999),
            Some("g.png"),
            &mut view,
        );
        shop.change_quantity(ProductId::new(2), 2, &mut view);
        shop.toggle_wishlist(ProductId::new(7), &mut view);

        let original_cart = shop.cart().clone();
        let restored = Shop::load(shop.into_storage(), PricingPolicy::default());

        assert_eq!(restored.cart(), &original_cart);
        assert!(restored.is_wishlisted(ProductId::new(7)));
    }

    #[test]
    fn test_checkout_accepted_clears_cart() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        add_widget(&mut shop, &mut view);
        add_widget(&mut shop, &mut view);

        let mut asked = None;
        let outcome = shop
            .checkout(&mut view, &mut |prompt: &str| {
                asked = Some(prompt.to_owned());
                true
            })
            .unwrap();

        assert_eq!(asked.as_deref(), Some("Proceed to checkout for $31.59?"));
        assert!(matches!(outcome, CheckoutOutcome::Placed { summary } if summary.total == Decimal::new(3159, 2)));
        assert!(shop.cart().is_empty());
        assert_eq!(stored_cart(&shop), serde_json::json!([]));
        assert_eq!(view.messages.last().unwrap(), messages::ORDER_PLACED);
    }

    #[test]
    fn test_checkout_cancelled_keeps_state() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        add_widget(&mut shop, &mut view);
        let before = shop.storage().clone();

        let outcome = shop.checkout(&mut view, &mut |_: &str| false).unwrap();

        assert_eq!(outcome, CheckoutOutcome::Cancelled);
        assert_eq!(shop.total_item_count(), 1);
        assert_eq!(shop.storage(), &before);
    }

    #[test]
    fn test_checkout_empty_cart_rejects() {
        let mut shop = shop();
        let mut view = RecordingView::default();
        let mut asked = false;

        let result = shop.checkout(&mut view, &mut |_: &str| {
            asked = true;
            true
        });

        assert_eq!(result, Err(CheckoutError::EmptyCart));
        assert!(!asked);
        assert_eq!(view.rejections, vec!["Your cart is empty!".to_string()]);
        assert!(shop.storage().get_item(CART_KEY).is_none());
    }

    #[test]
    fn test_wishlist_toggle_scenario() {
        let mut shop = shop();
        let mut view = RecordingView::default();

        assert!(shop.toggle_wishlist(ProductId::new(5), &mut view));
        assert!(shop.is_wishlisted(ProductId::new(5)));
        assert!(!shop.toggle_wishlist(ProductId::new(5), &mut view));
        assert!(!shop.is_wishlisted(ProductId::new(5)));

        assert_eq!(shop.storage().get_item(WISHLIST_KEY).unwrap(), "[]");
        assert_eq!(
            view.controls,
            vec![(ProductId::new(5), true), (ProductId::new(5), false)]
        );
        assert_eq!(view.messages, vec!["Added to wishlist!", "Removed from wishlist"]);
    }

    #[test]
    fn test_sync_wishlist_view_activates_members() {
        let store: MemoryStore = [(WISHLIST_KEY, "[4,2]")].into_iter().collect();
        let shop = Shop::load(store, PricingPolicy::default());
        let mut view = RecordingView::default();

        shop.sync_wishlist_view(&mut view);

        assert_eq!(
            view.controls,
            vec![(ProductId::new(4), true), (ProductId::new(2), true)]
        );
    }

    #[test]
    fn test_load_treats_invalid_storage_as_empty() {
        let store: MemoryStore = [(CART_KEY, "oops"), (WISHLIST_KEY, "{\"a\":1}")]
            .into_iter()
            .collect();
        let shop = Shop::load(store, PricingPolicy::default());

        assert!(shop.cart().is_empty());
        assert!(shop.wishlist().is_empty());
    }
}
