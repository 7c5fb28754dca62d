//! Vitrin Core - Storefront domain types and state reducers.
//!
//! This crate provides the state layer shared by every Vitrin component:
//! - `storefront` - Public-facing server-rendered shop
//! - `integration-tests` - End-to-end tests against a stub catalog
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous reducers - no I/O, no
//! HTTP clients, no session storage. Every mutation runs to completion and
//! leaves derived fields (cart totals, filtered listings) consistent.
//!
//! # Modules
//!
//! - [`types`] - Product data, type-safe IDs, prices and locales
//! - [`cart`] - Cart reducer with totals recomputed on every mutation
//! - [`filters`] - Listing filter state and partial updates
//! - [`listing`] - Filter/sort over the catalog with a small result cache
//! - [`pagination`] - Page math and the visible page strip

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filters;
pub mod listing;
pub mod pagination;
pub mod types;

pub use cart::{Cart, CartItem, MAX_LINE_QUANTITY};
pub use filters::{DEFAULT_MAX_PRICE, FilterUpdate, ProductFilters, SortBy, SortByError};
pub use listing::{FILTER_CACHE_CAPACITY, FilterCache, ProductListing, filter_and_sort};
pub use pagination::{FEATURED_PRODUCT_COUNT, PRODUCTS_PER_PAGE, PageLink, Pagination};
pub use types::*;
