//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors, binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Security headers (CSP, frame options, etc.)
//! 6. Rate limiting on contact submissions (governor)
//!
//! [`ShopSession`] is an extractor rather than a layer: handlers that touch
//! the cart or wishlist take it as a parameter.

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod shop_session;

pub use rate_limit::contact_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use shop_session::ShopSession;
