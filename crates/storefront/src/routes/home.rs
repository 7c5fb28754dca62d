//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;
use vitrin_core::{FEATURED_PRODUCT_COUNT, Locale, ProductFilters};

use super::products::{ProductView, listing_href};
use crate::filters;
use crate::state::AppState;

/// A category tile linking into the filtered listing.
#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    pub href: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub locale: Locale,
    pub featured_products: Vec<ProductView>,
    pub categories: Vec<CategoryLink>,
}

/// Display home page: the first products in catalog order and the category
/// shortcuts. Catalog failures render the page without them.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Path(locale): Path<Locale>) -> impl IntoResponse {
    let featured_products = match state.catalog().products().await {
        Ok(products) => products
            .iter()
            .take(FEATURED_PRODUCT_COUNT)
            .map(|p| ProductView::new(p, locale))
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch featured products");
            Vec::new()
        }
    };

    let categories = state
        .categories()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to fetch categories");
            Vec::new()
        })
        .into_iter()
        .map(|name| {
            let filters = ProductFilters {
                category: name.clone(),
                ..ProductFilters::default()
            };
            CategoryLink {
                href: listing_href(locale, &filters, 1),
                name,
            }
        })
        .collect();

    HomeTemplate {
        locale,
        featured_products,
        categories,
    }
}
