//! Product catalog REST API client.
//!
//! # Architecture
//!
//! - Plain `reqwest` GETs against a fixed base URL (fakestoreapi.com by default)
//! - The catalog is the source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` with a per-endpoint TTL (5 min to 1 h)
//! - No retries or backoff: callers log failures and render empty states
//!
//! # Endpoints
//!
//! - `GET /products` - full product list
//! - `GET /products/{id}` - single product
//! - `GET /products/categories` - category names
//! - `GET /products/category/{category}` - products in a category
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrin_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! let products = client.products().await?;
//! let product = client.product(ProductId::new(1)).await?;
//! ```

mod cache;
mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl CatalogError {
    /// Whether the error means the resource doesn't exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Catalog returned HTTP 503: maintenance");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
