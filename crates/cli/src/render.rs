//! Terminal output.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{self, BufRead, Write};

use lantern_core::{Cart, Confirm, Notifier, OrderSummary, Product, ShopView, format_amount};

/// Prints shop feedback to the terminal.
///
/// Confirmations go to stdout, rejections to stderr. The timed effects a
/// browser shows (toast fade, "Added!" label) have no terminal equivalent.
#[derive(Debug, Default)]
pub struct TerminalView;

impl Notifier for TerminalView {
    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    fn reject(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

impl ShopView for TerminalView {
    fn refresh_cart_count(&mut self, count: u32) {
        println!("Cart: {count} item(s)");
    }
}

/// Asks the checkout question on stdin. Anything but `y`/`yes` declines.
#[derive(Debug, Default)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Print the cart lines and order summary.
pub fn print_cart(cart: &Cart, summary: &OrderSummary) {
    if cart.is_empty() {
        println!("Your cart is empty");
    } else {
        for item in cart.items() {
            println!(
                "{:>4}  {:<28} {:>3} x {:>9} = {:>10}",
                item.id,
                item.name,
                item.quantity,
                item.unit_price.to_string(),
                format_amount(item.line_total()),
            );
        }
    }

    println!();
    println!("Subtotal: {:>10}", summary.subtotal_display());
    println!("Shipping: {:>10}", summary.shipping_display());
    println!("Tax:      {:>10}", summary.tax_display());
    println!("Total:    {:>10}", summary.total_display());
}

/// Print one product per line.
pub fn print_products<'a>(products: impl IntoIterator<Item = &'a Product>) {
    let mut shown = 0_usize;
    for product in products {
        println!(
            "{:>4}  {:<28} {:<12} {:>9}",
            product.id,
            product.name,
            product.category,
            product.price.to_string(),
        );
        shown += 1;
    }
    if shown == 0 {
        println!("No products found");
    }
}

/// Print a bare line of output.
pub fn print_line(line: &str) {
    println!("{line}");
}
