//! Cart persistence in the visitor's session.
//!
//! The item list is stored as JSON under a single fixed key. Totals are never
//! stored; they are recomputed from the items on load.

use tower_sessions::Session;
use vitrin_core::{Cart, CartItem};

/// Session key holding the cart's items.
pub const CART_KEY: &str = "ecommerce-cart";

/// Load the cart from the session.
///
/// Missing data yields an empty cart. Malformed data is removed and also
/// yields an empty cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    match session.get::<Vec<CartItem>>(CART_KEY).await {
        Ok(Some(items)) => Ok(Cart::from_items(items)),
        Ok(None) => Ok(Cart::new()),
        Err(tower_sessions::session::Error::SerdeJson(e)) => {
            tracing::warn!(error = %e, "Discarding malformed cart data");
            session.remove_value(CART_KEY).await?;
            Ok(Cart::new())
        }
        Err(e) => Err(e),
    }
}

/// Save the cart's items to the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_KEY, cart.items()).await
}

/// Remove the cart from the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove_value(CART_KEY).await?;
    Ok(())
}
