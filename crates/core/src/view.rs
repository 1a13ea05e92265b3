//! Presentation collaborators the shop calls into.
//!
//! The shop never renders anything itself. After each mutation it tells the
//! view what changed and hands it a message for the notification surface;
//! the view decides what that means (a toast flash, a printed line, nothing).
//! Timed effects such as dismissing a toast or reverting a button label are
//! the view's business and never touch shop state.

use crate::cart::Cart;
use crate::summary::OrderSummary;
use crate::types::ProductId;

/// Transient message surface. One message is visible at a time; a new
/// message replaces whatever is currently shown.
pub trait Notifier {
    /// Show a confirmation message.
    fn notify(&mut self, message: &str);

    /// Show a rejection (an operation the shopper asked for was refused).
    fn reject(&mut self, message: &str) {
        self.notify(message);
    }
}

/// Re-render hooks invoked after shop mutations.
///
/// All hooks default to no-ops so a view only implements what it shows.
pub trait ShopView: Notifier {
    /// The cart item count changed; refresh any count badge.
    fn refresh_cart_count(&mut self, _count: u32) {}

    /// The cart contents changed; refresh any item listing and summary.
    fn refresh_cart_items(&mut self, _cart: &Cart, _summary: &OrderSummary) {}

    /// The add control for `id` was used; show transient "Added!" feedback.
    fn mark_added(&mut self, _id: ProductId) {}

    /// Set the wishlist control for `id` active or inactive. Views ignore
    /// ids they are not currently showing.
    fn set_wishlist_control(&mut self, _id: ProductId, _active: bool) {}
}

/// Synchronous yes/no gate used before placing an order.
pub trait Confirm {
    /// Ask `prompt`; `true` means the shopper accepted.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A view that discards everything, for callers that only need state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentView;

impl Notifier for SilentView {
    fn notify(&mut self, _message: &str) {}
}

impl ShopView for SilentView {}
