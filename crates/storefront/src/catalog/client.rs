//! HTTP client for the product catalog.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use vitrin_core::{Product, ProductId};

use super::CatalogError;
use super::cache::{CacheKey, CacheValue, CatalogExpiry};
use crate::config::CatalogConfig;

/// Longest body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the product catalog API.
///
/// Cheap to clone; all clones share one connection pool and one cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .expire_after(CatalogExpiry)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Issue a GET and return the raw body of a successful response.
    async fn get_text(&self, path: &str) -> Result<String, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);

        let response = self
            .inner
            .client
            .get(&url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %excerpt(&body),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }

    /// GET and decode a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let body = self.get_text(path).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the body doesn't parse.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<[Product]>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Arc<[Product]> = self.get_json::<Vec<Product>>("/products").await?.into();

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Get a single product.
    ///
    /// The upstream answers an unknown id with `200` and an empty body, so
    /// that is reported as [`CatalogError::NotFound`] as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the product doesn't exist or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let path = format!("/products/{id}");
        let body = self.get_text(&path).await?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(CatalogError::NotFound(format!("Product not found: {id}")));
        }

        let product: Product = serde_json::from_str(trimmed).map_err(|e| {
            tracing::error!(error = %e, body = %excerpt(trimmed), "Failed to parse product");
            CatalogError::Parse(e)
        })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the catalog's category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<[String]>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Arc<[String]> = self
            .get_json::<Vec<String>>("/products/categories")
            .await?
            .into();

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(Arc::clone(&categories)),
            )
            .await;

        Ok(categories)
    }

    /// Get the products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products_in_category(
        &self,
        category: &str,
    ) -> Result<Arc<[Product]>, CatalogError> {
        let cache_key = CacheKey::Category(category.to_string());

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(products);
        }

        let path = format!("/products/category/{}", urlencoding::encode(category));
        let products: Arc<[Product]> = self.get_json::<Vec<Product>>(&path).await?.into();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Ids of every product, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list can't be fetched.
    pub async fn product_ids(&self) -> Result<Vec<ProductId>, CatalogError> {
        Ok(self.products().await?.iter().map(|p| p.id).collect())
    }

    /// Check that the catalog is reachable. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog doesn't answer successfully.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        self.get_text("/products?limit=1").await.map(|_| ())
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
