//! Cache types for catalog API responses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use vitrin_core::{Product, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Product(ProductId),
    Categories,
    Category(String),
}

impl CacheKey {
    /// How long a response stays fresh.
    ///
    /// Categories almost never change; single products change less often
    /// than the listing.
    pub const fn ttl(&self) -> Duration {
        match self {
            Self::Products | Self::Category(_) => Duration::from_secs(300),
            Self::Product(_) => Duration::from_secs(600),
            Self::Categories => Duration::from_secs(3600),
        }
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<[Product]>),
    Product(Box<Product>),
    Categories(Arc<[String]>),
}

/// Per-key expiry policy.
pub struct CatalogExpiry;

impl Expiry<CacheKey, CacheValue> for CatalogExpiry {
    fn expire_after_create(
        &self,
        key: &CacheKey,
        _value: &CacheValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(key.ttl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttls() {
        assert_eq!(CacheKey::Products.ttl(), Duration::from_secs(300));
        assert_eq!(CacheKey::Product(ProductId::new(1)).ttl(), Duration::from_secs(600));
        assert_eq!(CacheKey::Categories.ttl(), Duration::from_secs(3600));
        assert_eq!(
            CacheKey::Category("jewelery".to_string()).ttl(),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn test_expiry_uses_key_ttl() {
        let value = CacheValue::Categories(Vec::new().into());
        let ttl = CatalogExpiry.expire_after_create(&CacheKey::Categories, &value, Instant::now());
        assert_eq!(ttl, Some(Duration::from_secs(3600)));
    }
}
