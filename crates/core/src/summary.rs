//! Order summary: subtotal, shipping, tax and total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::price::format_amount;

/// Flat shipping fee and tax rate applied to every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Charged once whenever the subtotal is positive.
    pub shipping_fee: Decimal,
    /// Fraction of the subtotal charged as tax (0.08 = 8%).
    pub tax_rate: Decimal,
}

impl PricingPolicy {
    /// $9.99 shipping.
    pub const DEFAULT_SHIPPING_FEE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);
    /// 8% tax.
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

    /// Compute the summary for `cart`. Pure; recomputed from every line.
    #[must_use]
    pub fn summarize(&self, cart: &Cart) -> OrderSummary {
        let subtotal = cart.subtotal();
        let shipping = if subtotal > Decimal::ZERO {
            self.shipping_fee
        } else {
            Decimal::ZERO
        };
        let tax = subtotal.saturating_mul(self.tax_rate);

        OrderSummary {
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_fee: Self::DEFAULT_SHIPPING_FEE,
            tax_rate: Self::DEFAULT_TAX_RATE,
        }
    }
}

/// Unrounded order amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_amount(self.subtotal)
    }

    /// Shipping line, shown as "Free" when nothing is charged.
    #[must_use]
    pub fn shipping_display(&self) -> String {
        if self.subtotal > Decimal::ZERO {
            format_amount(self.shipping)
        } else {
            "Free".to_string()
        }
    }

    #[must_use]
    pub fn tax_display(&self) -> String {
        format_amount(self.tax)
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        format_amount(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn two_widgets() -> Cart {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Widget", Price::from_cents(1000), None);
        cart.add(ProductId::new(1), "Widget", Price::from_cents(1000), None);
        cart
    }

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping_fee, Decimal::new(999, 2));
        assert_eq!(policy.tax_rate, Decimal::new(8, 2));
    }

    #[test]
    fn test_two_widgets_summary() {
        let summary = PricingPolicy::default().summarize(&two_widgets());

        assert_eq!(summary.subtotal, Decimal::new(2000, 2));
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.tax, Decimal::new(160, 2));
        assert_eq!(summary.total, Decimal::new(3159, 2));
        assert_eq!(summary.total_display(), "$31.59");
        assert_eq!(summary.tax_display(), "$1.60");
    }

    #[test]
    fn test_empty_cart_has_free_shipping() {
        let summary = PricingPolicy::default().summarize(&Cart::new());

        assert_eq!(summary, OrderSummary::default());
        assert_eq!(summary.shipping_display(), "Free");
        assert_eq!(summary.total_display(), "$0.00");
    }

    #[test]
    fn test_summarize_is_pure() {
        let cart = two_widgets();
        let policy = PricingPolicy::default();
        assert_eq!(policy.summarize(&cart), policy.summarize(&cart));
    }

    #[test]
    fn test_overflowing_amounts_saturate() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Huge", Price::new(Decimal::MAX), None);
        cart.add(ProductId::new(1), "Huge", Price::new(Decimal::MAX), None);
        cart.add(ProductId::new(2), "Huge", Price::new(Decimal::MAX), None);

        let summary = PricingPolicy::default().summarize(&cart);
        assert_eq!(summary.subtotal, Decimal::MAX);
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.total, Decimal::MAX);
    }

    #[test]
    fn test_tax_accumulates_unrounded() {
        let mut cart = Cart::new();
        for id in 1..=3 {
            cart.add(ProductId::new(id), "Sticker", Price::from_cents(105), None);
        }

        let summary = PricingPolicy::default().summarize(&cart);
        // 3 x 1.05 x 0.08 = 0.252, rounded only for display
        assert_eq!(summary.tax, Decimal::new(2520, 4));
        assert_eq!(summary.tax_display(), "$0.25");
    }
}
