//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /{locale}                   - Home page (featured products)
//! GET  /sitemap.xml                - Sitemap
//!
//! # Products
//! GET  /{locale}/products          - Product listing (filters in the query string)
//! GET  /{locale}/products/{id}     - Product detail
//!
//! # Cart (HTMX fragments)
//! GET  /{locale}/cart              - Cart page
//! POST /{locale}/cart/add          - Add to cart (returns count badge, triggers cart-updated)
//! POST /{locale}/cart/update       - Update quantity (returns cart_items fragment)
//! POST /{locale}/cart/remove       - Remove item (returns cart_items fragment)
//! POST /{locale}/cart/clear        - Empty the cart (returns cart_items fragment)
//! GET  /{locale}/cart/count        - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod home;
pub mod products;
pub mod sitemap;

use axum::{
    Router,
    http::Uri,
    response::Response,
    routing::{get, post},
};
use vitrin_core::Locale;

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{locale}/products", get(products::index))
        .route("/{locale}/products/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/{locale}/cart", get(cart::show))
        .route("/{locale}/cart/add", post(cart::add))
        .route("/{locale}/cart/update", post(cart::update))
        .route("/{locale}/cart/remove", post(cart::remove))
        .route("/{locale}/cart/clear", post(cart::clear))
        .route("/{locale}/cart/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{locale}", get(home::home))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .merge(product_routes())
        .merge(cart_routes())
}

/// Fallback: the 404 page in the locale of the requested path.
pub async fn not_found(uri: Uri) -> Response {
    let locale = uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| segment.parse::<Locale>().ok())
        .unwrap_or_default();

    products::not_found_page(locale)
}
