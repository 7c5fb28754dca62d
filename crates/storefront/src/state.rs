//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vitrin_core::{Product, ProductFilters, ProductListing};

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog client, configuration and the shared product listing.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    listing: Mutex<ProductListing>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                listing: Mutex::new(ProductListing::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Products matching `filters`, served from the listing's filter cache.
    ///
    /// Fetches the catalog first. When the fetched list is a different
    /// snapshot from the one the listing holds, the listing takes it and its
    /// filter cache is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list can't be fetched.
    pub async fn filtered_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Arc<[Product]>, CatalogError> {
        let products = self.catalog().products().await?;

        let mut listing = self.listing();
        if !Arc::ptr_eq(listing.products(), &products) {
            tracing::debug!(count = products.len(), "Refreshing product listing");
            listing.set_products(products);
        }

        Ok(listing.filtered(filters))
    }

    /// Category names, kept in the listing once fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the categories can't be fetched.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let categories = self.catalog().categories().await?;

        let mut listing = self.listing();
        if listing.categories() != &categories[..] {
            listing.set_categories(categories.to_vec());
        }

        Ok(listing.categories().to_vec())
    }

    fn listing(&self) -> MutexGuard<'_, ProductListing> {
        self.inner
            .listing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
