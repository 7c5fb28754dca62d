//! Product listing: filter, sort and memoize.
//!
//! [`ProductListing`] holds the full catalog snapshot and a small cache of
//! filtered results keyed by filter combination. Replacing the snapshot
//! clears the cache.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::filters::{ProductFilters, SortBy};
use crate::types::Product;

/// Maximum number of filter combinations kept by [`FilterCache`].
pub const FILTER_CACHE_CAPACITY: usize = 10;

/// Filter and sort a product list.
///
/// Keeps products whose category equals `filters.category` (unless it is
/// empty) and whose price lies in `[min_price, max_price]`, then applies a
/// stable sort in the requested direction.
#[must_use]
pub fn filter_and_sort(products: &[Product], filters: &ProductFilters) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| filters.category.is_empty() || product.category == filters.category)
        .filter(|product| {
            let price = product.price.amount();
            price >= filters.min_price && price <= filters.max_price
        })
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::PriceAsc => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceDesc => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::NameAsc => filtered.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortBy::NameDesc => filtered.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }

    filtered
}

/// Case-insensitive title order, falling back to the exact title.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Bounded memo of filtered listings.
///
/// Evicts the oldest-inserted key once the size exceeds the capacity. Lookups
/// don't change the eviction order.
#[derive(Debug)]
pub struct FilterCache {
    capacity: usize,
    entries: HashMap<ProductFilters, Arc<[Product]>>,
    order: VecDeque<ProductFilters>,
}

impl Default for FilterCache {
    fn default() -> Self {
        Self::with_capacity(FILTER_CACHE_CAPACITY)
    }
}

impl FilterCache {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
        }
    }

    #[must_use]
    pub fn get(&self, filters: &ProductFilters) -> Option<Arc<[Product]>> {
        self.entries.get(filters).cloned()
    }

    /// Insert a result, evicting the oldest entry if over capacity.
    pub fn insert(&mut self, filters: ProductFilters, products: Arc<[Product]>) {
        if self.entries.insert(filters.clone(), products).is_none() {
            self.order.push_back(filters);
        }

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    #[must_use]
    pub fn contains(&self, filters: &ProductFilters) -> bool {
        self.entries.contains_key(filters)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Catalog snapshot with memoized filtered views.
#[derive(Debug, Default)]
pub struct ProductListing {
    products: Arc<[Product]>,
    categories: Vec<String>,
    cache: FilterCache,
}

impl ProductListing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog snapshot. Clears the filter cache.
    pub fn set_products(&mut self, products: impl Into<Arc<[Product]>>) {
        self.products = products.into();
        self.cache.clear();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    /// The unfiltered snapshot.
    #[must_use]
    pub fn products(&self) -> &Arc<[Product]> {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Filtered and sorted view for a filter combination.
    pub fn filtered(&mut self, filters: &ProductFilters) -> Arc<[Product]> {
        if let Some(cached) = self.cache.get(filters) {
            return cached;
        }

        let result: Arc<[Product]> = filter_and_sort(&self.products, filters).into();
        self.cache.insert(filters.clone(), Arc::clone(&result));
        result
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub const fn cache(&self) -> &FilterCache {
        &self.cache
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::filters::FilterUpdate;
    use crate::types::{Price, ProductId, Rating};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn product(id: i64, title: &str, cents: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(cents),
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Backpack", 10995, "men's clothing"),
            product(2, "t-shirt", 2230, "men's clothing"),
            product(3, "Gold Ring", 16800, "jewelery"),
            product(4, "SSD", 10900, "electronics"),
            product(5, "Monitor", 99999, "electronics"),
            product(6, "Cable", 2230, "electronics"),
            product(7, "Yacht", 150_000, "electronics"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    fn filters(update: FilterUpdate) -> ProductFilters {
        let mut filters = ProductFilters::default();
        filters.apply(update);
        filters
    }

    #[test]
    fn test_category_filter_matches_exactly() {
        let result = filter_and_sort(
            &catalog(),
            &filters(FilterUpdate::default().category("electronics")),
        );

        assert!(result.iter().all(|p| p.category == "electronics"));
        assert_eq!(ids(&result), vec![6, 4, 5]);
    }

    #[test]
    fn test_default_filters_bound_price_range() {
        let result = filter_and_sort(&catalog(), &ProductFilters::default());

        // 1500.00 is outside the default 0..=1000 range
        assert_eq!(result.len(), 6);
        assert!(!ids(&result).contains(&7));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let result = filter_and_sort(
            &catalog(),
            &filters(
                FilterUpdate::default()
                    .min_price(Decimal::new(2230, 2))
                    .max_price(Decimal::new(10995, 2)),
            ),
        );

        assert_eq!(ids(&result), vec![2, 6, 4, 1]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let asc = filter_and_sort(&catalog(), &ProductFilters::default());
        // 2 and 6 share a price and keep catalog order
        assert_eq!(ids(&asc)[..2], [2, 6]);

        let desc = filter_and_sort(
            &catalog(),
            &filters(FilterUpdate::default().sort_by(SortBy::PriceDesc)),
        );
        assert_eq!(ids(&desc), vec![5, 3, 1, 4, 2, 6]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let asc = filter_and_sort(
            &catalog(),
            &filters(FilterUpdate::default().sort_by(SortBy::NameAsc)),
        );
        let titles: Vec<&str> = asc.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Backpack", "Cable", "Gold Ring", "Monitor", "SSD", "t-shirt"]);

        let desc = filter_and_sort(
            &catalog(),
            &filters(FilterUpdate::default().sort_by(SortBy::NameDesc)),
        );
        assert_eq!(desc.first().unwrap().title, "t-shirt");
    }

    #[test]
    fn test_cache_evicts_oldest_inserted() {
        let mut cache = FilterCache::default();
        let empty: Arc<[Product]> = Vec::new().into();

        for i in 0..=10 {
            let key = filters(FilterUpdate::default().min_price(Decimal::from(i)));
            cache.insert(key, Arc::clone(&empty));
        }

        assert_eq!(cache.len(), FILTER_CACHE_CAPACITY);
        assert!(!cache.contains(&filters(FilterUpdate::default().min_price(Decimal::ZERO))));
        assert!(cache.contains(&filters(FilterUpdate::default().min_price(Decimal::from(10)))));
    }

    #[test]
    fn test_cache_hit_does_not_refresh_order() {
        let mut cache = FilterCache::with_capacity(2);
        let empty: Arc<[Product]> = Vec::new().into();
        let a = filters(FilterUpdate::default().category("a"));
        let b = filters(FilterUpdate::default().category("b"));
        let c = filters(FilterUpdate::default().category("c"));

        cache.insert(a.clone(), Arc::clone(&empty));
        cache.insert(b.clone(), Arc::clone(&empty));
        assert!(cache.get(&a).is_some());
        cache.insert(c.clone(), Arc::clone(&empty));

        assert!(!cache.contains(&a));
        assert!(cache.contains(&b));
        assert!(cache.contains(&c));
    }

    #[test]
    fn test_listing_memoizes_results() {
        let mut listing = ProductListing::new();
        listing.set_products(catalog());
        let jewelery = filters(FilterUpdate::default().category("jewelery"));

        let first = listing.filtered(&jewelery);
        let second = listing.filtered(&jewelery);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(listing.cache().len(), 1);
    }

    #[test]
    fn test_set_products_clears_cache() {
        let mut listing = ProductListing::new();
        listing.set_products(catalog());
        let _ = listing.filtered(&ProductFilters::default());

        listing.set_products(vec![product(9, "Only", 100, "misc")]);

        assert!(listing.cache().is_empty());
        assert_eq!(ids(&listing.filtered(&ProductFilters::default())), vec![9]);
    }

    #[test]
    fn test_reset_filters_restores_full_set() {
        let mut listing = ProductListing::new();
        listing.set_products(catalog());
        let mut current = filters(FilterUpdate::default().category("jewelery"));
        assert_eq!(listing.filtered(&current).len(), 1);

        current.reset();
        listing.clear_cache();

        assert_eq!(listing.filtered(&current).len(), 6);
    }

    #[test]
    fn test_categories() {
        let mut listing = ProductListing::new();
        listing.set_categories(vec!["electronics".to_string(), "jewelery".to_string()]);
        assert_eq!(listing.categories(), ["electronics", "jewelery"]);
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (1_i64..1000, "[a-zA-Z ]{1,12}", 0_i64..200_000, prop::sample::select(vec!["a", "b", "c"]))
            .prop_map(|(id, title, cents, category)| product(id, &title, cents, category))
    }

    fn arb_sort() -> impl Strategy<Value = SortBy> {
        prop::sample::select(SortBy::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_sort_is_monotonic(products in prop::collection::vec(arb_product(), 0..30), sort in arb_sort()) {
            let result = filter_and_sort(&products, &filters(FilterUpdate::default().sort_by(sort)));
            for pair in result.windows(2) {
                let ordering = match sort {
                    SortBy::PriceAsc => pair[0].price.cmp(&pair[1].price),
                    SortBy::PriceDesc => pair[1].price.cmp(&pair[0].price),
                    SortBy::NameAsc => compare_titles(&pair[0].title, &pair[1].title),
                    SortBy::NameDesc => compare_titles(&pair[1].title, &pair[0].title),
                };
                prop_assert_ne!(ordering, Ordering::Greater);
            }
        }

        #[test]
        fn prop_category_filter_only_returns_matches(products in prop::collection::vec(arb_product(), 0..30)) {
            let result = filter_and_sort(&products, &filters(FilterUpdate::default().category("b")));
            prop_assert!(result.iter().all(|p| p.category == "b"));
        }
    }
}
