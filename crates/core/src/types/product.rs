//! Catalog product as served by the upstream API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog product.
///
/// Deserialized verbatim from the catalog API and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    /// Absolute image URL on the catalog's CDN.
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    pub count: u32,
}
