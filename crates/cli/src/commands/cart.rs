//! Cart commands.

use lantern_core::{Price, ProductId, QuantityChange, Shop};

use crate::render::{self, PromptConfirm, TerminalView};
use crate::store::FileStore;

/// Add one unit of a product. Name and price are taken as given.
pub fn add(
    shop: &mut Shop<FileStore>,
    id: ProductId,
    name: &str,
    price: Price,
    image: Option<&str>,
) {
    shop.add_item(id, name, price, image, &mut TerminalView);
}

/// Remove a product's line. Absent ids are silently ignored.
pub fn remove(shop: &mut Shop<FileStore>, id: ProductId) {
    if !shop.remove_item(id, &mut TerminalView) {
        tracing::info!(product_id = %id, "Not in cart");
    }
}

/// Change a line's quantity.
pub fn change_quantity(shop: &mut Shop<FileStore>, id: ProductId, delta: i32) {
    match shop.change_quantity(id, delta, &mut TerminalView) {
        QuantityChange::Missing => tracing::info!(product_id = %id, "Not in cart"),
        QuantityChange::Updated(quantity) => {
            render::print_line(&format!("Quantity now {quantity}"));
        }
        QuantityChange::Removed => {}
    }
}

/// Print the cart.
pub fn show(shop: &Shop<FileStore>) {
    render::print_cart(shop.cart(), &shop.summary());
}

/// Place the order, asking on stdin unless `yes` is set.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub fn checkout(shop: &mut Shop<FileStore>, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = if yes {
        shop.checkout(&mut TerminalView, &mut |_: &str| true)?
    } else {
        shop.checkout(&mut TerminalView, &mut PromptConfirm)?
    };
    tracing::debug!(?outcome, "Checkout finished");
    Ok(())
}
