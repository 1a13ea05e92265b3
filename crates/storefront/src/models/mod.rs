//! Session-backed models for storefront.
//!
//! - [`session`] - The visitor's key-value storage, kept in their session
//! - [`flash`] - One-shot toast and "Added!" feedback shown on the next page

pub mod flash;
pub mod session;

pub use flash::{Flash, FlashView, Toast, ToastKind};
pub use session::{SessionStorage, keys};
