//! Shopping cart reducer.
//!
//! The cart is an ordered list of lines plus two derived totals. Every
//! mutation recomputes the totals from the lines before returning, so callers
//! can never observe a total that disagrees with the items.
//!
//! Persistence is the caller's concern: serialize [`Cart::items`] after each
//! mutation and rebuild with [`Cart::from_items`].

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Most units a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// A quantity-bearing reference to a product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }
}

/// The in-progress order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    total_quantity: u64,
    total_amount: Price,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Lines with a zero quantity are dropped, repeated ids are merged into
    /// the first occurrence and quantities are capped at [`MAX_LINE_QUANTITY`],
    /// so stored data can't break the cart invariants.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            match merged.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_LINE_QUANTITY);
                }
                None => merged.push(CartItem {
                    quantity: item.quantity.min(MAX_LINE_QUANTITY),
                    ..item
                }),
            }
        }

        let mut cart = Self {
            items: merged,
            ..Self::default()
        };
        cart.recalculate();
        cart
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for the product (up to
    /// [`MAX_LINE_QUANTITY`]), or appends a new line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1).min(MAX_LINE_QUANTITY),
            None => self.items.push(CartItem::from(product)),
        }
        self.recalculate();
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
        self.recalculate();
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or below removes the line; larger quantities are
    /// capped at [`MAX_LINE_QUANTITY`]. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.items.retain(|item| item.id != id);
        } else if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = u32::try_from(quantity)
                .unwrap_or(MAX_LINE_QUANTITY)
                .min(MAX_LINE_QUANTITY);
        }
        self.recalculate();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its lines for persistence.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Sum of all line totals.
    #[must_use]
    pub const fn total_amount(&self) -> Price {
        self.total_amount
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recalculate(&mut self) {
        self.total_quantity = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        self.total_amount = self.items.iter().map(CartItem::line_total).sum();
    }
}
