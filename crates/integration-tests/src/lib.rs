//! Integration tests for Vitrin.
//!
//! Each test starts its own stub catalog API and storefront on ephemeral
//! ports, then drives the storefront over HTTP with `reqwest`. Nothing
//! external is needed:
//!
//! ```bash
//! cargo test -p vitrin-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `health` - Liveness and readiness probes
//! - `locale` - Locale redirects and the sitemap
//! - `listing` - Filters, sorting, pagination and product pages
//! - `cart` - Session-backed cart across requests

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::net::TcpListener;
use vitrin_core::{Price, Product, ProductId, Rating};
use vitrin_storefront::{build_app, config::StorefrontConfig, state::AppState};

// =============================================================================
// Fixtures
// =============================================================================

/// `(id, title, price in cents, category)` for the stub catalog.
const FIXTURES: [(i64, &str, i64, &str); 12] = [
    (1, "Aurora Headphones", 7999, "electronics"),
    (2, "Beacon Smart Speaker", 4950, "electronics"),
    (3, "Cobalt USB-C Hub", 2400, "electronics"),
    (4, "Delta Portable SSD", 10900, "electronics"),
    (5, "Echo Monitor Arm", 6425, "electronics"),
    (6, "Fern Silver Ring", 16800, "jewelery"),
    (7, "Garnet Pendant", 69500, "jewelery"),
    (8, "Halo Stud Earrings", 999, "jewelery"),
    (9, "Iris Bracelet", 1200, "jewelery"),
    (10, "Juniper Rain Jacket", 5599, "men's clothing"),
    (11, "Kestrel Cotton Tee", 1599, "men's clothing"),
    (12, "Linden Slim Chinos", 3999, "men's clothing"),
];

/// The stub catalog's products.
#[must_use]
pub fn fixture_products() -> Vec<Product> {
    FIXTURES
        .iter()
        .map(|&(id, title, cents, category)| Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(cents),
            description: format!("{title} from the Vitrin test catalog."),
            category: category.to_string(),
            image: format!("https://fakestoreapi.com/img/{id}.jpg"),
            rating: Rating {
                rate: Decimal::new(40 + id % 10, 1),
                count: u32::try_from(id * 10).unwrap_or_default(),
            },
        })
        .collect()
}

// =============================================================================
// Stub Catalog
// =============================================================================

#[derive(Clone)]
struct CatalogState {
    products: Arc<Vec<Product>>,
    list_requests: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

async fn list_products(
    State(state): State<CatalogState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<Product>> {
    if query.limit.is_none() {
        state.list_requests.fetch_add(1, Ordering::SeqCst);
    }
    let limit = query.limit.unwrap_or(usize::MAX);
    Json(state.products.iter().take(limit).cloned().collect())
}

async fn list_categories(State(state): State<CatalogState>) -> Json<Vec<String>> {
    let mut categories: Vec<String> = Vec::new();
    for product in state.products.iter() {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    Json(categories)
}

async fn products_in_category(
    State(state): State<CatalogState>,
    Path(category): Path<String>,
) -> Json<Vec<Product>> {
    Json(
        state
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect(),
    )
}

/// Unknown ids get `200` with an empty body, like the real catalog.
async fn single_product(State(state): State<CatalogState>, Path(id): Path<String>) -> Response {
    id.parse::<i64>()
        .ok()
        .and_then(|id| state.products.iter().find(|p| p.id.as_i64() == id))
        .map_or_else(
            || String::new().into_response(),
            |product| Json(product.clone()).into_response(),
        )
}

/// A running stub of the catalog API.
pub struct StubCatalog {
    pub url: String,
    list_requests: Arc<AtomicUsize>,
}

impl StubCatalog {
    /// Start the stub on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an error if no port can be bound.
    pub async fn start() -> io::Result<Self> {
        let list_requests = Arc::new(AtomicUsize::new(0));
        let state = CatalogState {
            products: Arc::new(fixture_products()),
            list_requests: Arc::clone(&list_requests),
        };

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/categories", get(list_categories))
            .route("/products/category/{category}", get(products_in_category))
            .route("/products/{id}", get(single_product))
            .with_state(state);

        let addr = serve(app).await?;

        Ok(Self {
            url: format!("http://{addr}"),
            list_requests,
        })
    }

    /// How many times the full product list was requested.
    #[must_use]
    pub fn list_requests(&self) -> usize {
        self.list_requests.load(Ordering::SeqCst)
    }
}

/// A catalog URL nothing listens on.
///
/// # Errors
///
/// Returns an error if no port can be bound.
pub async fn unreachable_catalog_url() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

// =============================================================================
// Storefront
// =============================================================================

/// Start a storefront pointed at `catalog_url`; returns its base URL.
///
/// # Errors
///
/// Returns an error if the configuration is rejected or no port can be bound.
pub async fn start_storefront(catalog_url: &str) -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{addr}");

    let config = StorefrontConfig::from_lookup(|key| match key {
        "CATALOG_API_URL" => Some(catalog_url.to_string()),
        "STOREFRONT_BASE_URL" => Some(base_url.clone()),
        "STOREFRONT_PORT" => Some(addr.port().to_string()),
        _ => None,
    })
    .map_err(io::Error::other)?;

    let app = build_app(AppState::new(config));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(base_url)
}

/// A browser-like client: keeps cookies and follows redirects.
///
/// # Errors
///
/// Returns an error if the client can't be built.
pub fn browser() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().cookie_store(true).build()
}

/// A client that reports redirects instead of following them.
///
/// # Errors
///
/// Returns an error if the client can't be built.
pub fn no_redirect_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

async fn serve(app: Router) -> io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}
