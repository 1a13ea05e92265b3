//! Cart line items and the ordered cart collection.
//!
//! The cart holds at most one [`LineItem`] per product id, in the order the
//! products were first added. Quantities are always at least one; anything
//! that would take a quantity to zero removes the line instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Base URL for generated product thumbnails.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/80x80/4A90E2/ffffff?text=";

/// Fallback image URL encoding the product name.
///
/// ```
/// assert_eq!(
///     lantern_core::placeholder_image("Desk Lamp"),
///     "https://via.placeholder.com/80x80/4A90E2/ffffff?text=Desk%20Lamp"
/// );
/// ```
#[must_use]
pub fn placeholder_image(name: &str) -> String {
    format!("{PLACEHOLDER_IMAGE_BASE}{}", urlencoding::encode(name))
}

/// One product in the cart with its quantity.
///
/// Field names on the wire match the persisted storage layout:
/// `{id, name, price, quantity, image}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

impl LineItem {
    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity)
    }
}

/// Result of [`Cart::change_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line for that product id.
    Missing,
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity reached zero or below and the line was removed.
    Removed,
}

/// Ordered list of line items, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored lines, restoring the cart invariants.
    ///
    /// Lines with quantity 0 are dropped, lines sharing an id are merged
    /// into the first occurrence, and missing images get a placeholder.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items {
            if item.quantity == 0 {
                continue;
            }
            if let Some(existing) = cart.get_mut(item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                continue;
            }
            if item.image.is_empty() {
                item.image = placeholder_image(&item.name);
            }
            cart.items.push(item);
        }
        cart
    }

    /// Add one unit of a product and return its new quantity.
    ///
    /// Increments the existing line when the id is already present;
    /// otherwise appends a new line with quantity 1, using `image` or a
    /// generated placeholder.
    pub fn add(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Price,
        image: Option<&str>,
    ) -> u32 {
        if let Some(item) = self.get_mut(id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        let image = image
            .filter(|url| !url.is_empty())
            .map_or_else(|| placeholder_image(name), str::to_owned);
        self.items.push(LineItem {
            id,
            name: name.to_owned(),
            unit_price,
            quantity: 1,
            image,
        });
        1
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Add `delta` to the quantity of `id`, removing the line at zero or below.
    pub fn change_quantity(&mut self, id: ProductId, delta: i32) -> QuantityChange {
        let Some(item) = self.get_mut(id) else {
            return QuantityChange::Missing;
        };

        let next = i64::from(item.quantity) + i64::from(delta);
        if next <= 0 {
            self.remove(id);
            return QuantityChange::Removed;
        }

        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(item.quantity)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities, recomputed from the lines on every call.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }

    /// Sum of unit price times quantity, unrounded and saturating.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.line_total()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn widget(cart: &mut Cart) {
        cart.add(ProductId::new(1), "Widget", Price::from_cents(1000), None);
    }

    #[test]
    fn test_add_same_id_increments_quantity() {
        let mut cart = Cart::new();
        widget(&mut cart);
        widget(&mut cart);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].unit_price, Price::from_cents(1000));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(3), "Lamp", Price::from_cents(2500), None);
        widget(&mut cart);
        cart.add(ProductId::new(3), "Lamp", Price::from_cents(2500), None);

        let ids: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_add_uses_placeholder_without_image() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(2), "Tea & Honey", Price::ZERO, None);
        assert_eq!(
            cart.get(ProductId::new(2)).unwrap().image,
            "https://via.placeholder.com/80x80/4A90E2/ffffff?text=Tea%20%26%20Honey"
        );

        cart.add(
            ProductId::new(4),
            "Mug",
            Price::ZERO,
            Some("/static/img/mug.jpg"),
        );
        assert_eq!(
            cart.get(ProductId::new(4)).unwrap().image,
            "/static/img/mug.jpg"
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        widget(&mut cart);
        assert!(!cart.remove(ProductId::new(99)));
        assert_eq!(cart.len(), 1);
        assert!(cart.remove(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_never_leaves_non_positive() {
        let mut cart = Cart::new();
        widget(&mut cart);

        assert_eq!(
            cart.change_quantity(ProductId::new(1), 4),
            QuantityChange::Updated(5)
        );
        assert_eq!(
            cart.change_quantity(ProductId::new(1), -4),
            QuantityChange::Updated(1)
        );
        assert_eq!(
            cart.change_quantity(ProductId::new(1), -1),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());
        assert_eq!(
            cart.change_quantity(ProductId::new(1), 1),
            QuantityChange::Missing
        );
    }

    #[test]
    fn test_change_quantity_large_negative_removes() {
        let mut cart = Cart::new();
        widget(&mut cart);
        widget(&mut cart);
        assert_eq!(
            cart.change_quantity(ProductId::new(1), i32::MIN),
            QuantityChange::Removed
        );
        assert!(cart.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        widget(&mut cart);
        widget(&mut cart);
        cart.add(ProductId::new(2), "Gadget", Price::from_cents(550), None);

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(2550, 2));
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let line = |id: i32, quantity: u32| LineItem {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            unit_price: Price::from_cents(100),
            quantity,
            image: String::new(),
        };

        let cart = Cart::from_items(vec![line(1, 2), line(2, 0), line(1, 3), line(3, 1)]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 5);
        assert!(cart.get(ProductId::new(2)).is_none());
        assert_eq!(
            cart.get(ProductId::new(3)).unwrap().image,
            placeholder_image("Item 3")
        );
    }

    #[test]
    fn test_storage_layout() {
        let mut cart = Cart::new();
        cart.add(
            ProductId::new(1),
            "Widget",
            Price::from_cents(1050),
            Some("w.png"),
        );

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "name": "Widget", "price": 10.5, "quantity": 1, "image": "w.png"}
            ])
        );
    }
}
