//! Lantern Core - cart, wishlist and catalog state.
//!
//! This crate holds everything the Lantern Goods front ends share:
//! - `storefront` - Server-rendered shop (axum + askama)
//! - `cli` - Command-line tool driving the same stores against a JSON file
//!
//! # Architecture
//!
//! The core crate performs no I/O. Persistence goes through the
//! [`KeyValueStore`] trait and presentation goes through the collaborator
//! traits in [`view`], so each front end supplies its own storage and
//! rendering while the cart and wishlist rules live here once.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices and emails
//! - [`cart`] - Line items and the ordered cart collection
//! - [`wishlist`] - Favorited product ids
//! - [`summary`] - Subtotal, shipping, tax and total
//! - [`storage`] - Key-value storage trait and JSON helpers
//! - [`view`] - Notification, re-render and confirmation collaborators
//! - [`shop`] - The cart/wishlist state manager
//! - [`catalog`] - Products and listing filters
//! - [`contact`] - Contact form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod shop;
pub mod storage;
pub mod summary;
pub mod types;
pub mod view;
pub mod wishlist;

pub use cart::{Cart, LineItem, QuantityChange, placeholder_image};
pub use catalog::{Catalog, CatalogError, Product, ProductFilter};
pub use contact::{ContactError, ContactForm, ContactSubmission};
pub use shop::{CheckoutError, CheckoutOutcome, Shop};
pub use storage::{KeyValueStore, MemoryStore};
pub use summary::{OrderSummary, PricingPolicy};
pub use types::*;
pub use view::{Confirm, Notifier, ShopView, SilentView};
pub use wishlist::Wishlist;
