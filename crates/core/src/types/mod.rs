//! Core types for Vitrin.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod price;
pub mod product;

pub use id::*;
pub use locale::{Locale, LocaleError};
pub use price::Price;
pub use product::{Product, Rating};
