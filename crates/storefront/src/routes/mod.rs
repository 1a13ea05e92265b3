//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page, featured products
//!
//! # Products
//! GET  /products               - Listing (?category=&q=&wishlist=1)
//!
//! # Cart
//! GET  /cart                   - Cart page with order summary
//! POST /cart/add               - Add one unit (id, return_to)
//! POST /cart/update            - Change quantity (id, delta)
//! POST /cart/remove            - Remove line (id)
//! GET  /cart/count             - Cart count badge (text)
//!
//! # Checkout
//! GET  /checkout               - Confirmation page
//! POST /checkout               - Place or cancel (decision)
//!
//! # Wishlist
//! POST /wishlist/toggle        - Toggle membership (id, return_to)
//!
//! # Contact
//! GET  /contact                - Contact form
//! POST /contact                - Submit message (rate limited)
//! ```
//!
//! POST handlers answer with `303 See Other` so a reload never repeats a
//! cart operation.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod page;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::StorefrontConfig;
use crate::middleware::contact_rate_limiter;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes(config: &StorefrontConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::confirm).post(checkout::place))
        .route("/wishlist/toggle", post(wishlist::toggle))
        .route(
            "/contact",
            get(contact::show)
                .merge(post(contact::submit).layer(contact_rate_limiter(config.trust_proxy))),
        )
}
