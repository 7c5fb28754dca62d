//! Listing filter state.
//!
//! Filters are transient UI state: they live in the listing URL and are never
//! persisted. A [`FilterUpdate`] carries any subset of the fields and is merged
//! over the current filters.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: i64 = 1000;

/// Error parsing a sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0}")]
pub struct SortByError(pub String);

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortBy {
    /// Every sort order, in the order shown in the sort dropdown.
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::PriceAsc, Self::PriceDesc];

    /// Wire value (`price-asc`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = SortByError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| SortByError(s.to_string()))
    }
}

/// Constraints applied to the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductFilters {
    /// Exact category match; empty means all categories.
    pub category: String,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub sort_by: SortBy,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            category: String::new(),
            min_price: Decimal::ZERO,
            max_price: Decimal::from(DEFAULT_MAX_PRICE),
            sort_by: SortBy::default(),
        }
    }
}

impl ProductFilters {
    /// Merge a partial update into these filters.
    ///
    /// Returns `true` if any field actually changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let before = self.clone();

        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(min_price) = update.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = update.max_price {
            self.max_price = max_price;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }

        *self != before
    }

    /// Restore the default filters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any constraint differs from the defaults.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A partial set of filter changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<SortBy>,
}

impl FilterUpdate {
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn min_price(mut self, min_price: Decimal) -> Self {
        self.min_price = Some(min_price);
        self
    }

    #[must_use]
    pub const fn max_price(mut self, max_price: Decimal) -> Self {
        self.max_price = Some(max_price);
        self
    }

    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}
