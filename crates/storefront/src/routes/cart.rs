//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Without the `HX-Request` header a mutation redirects back to the cart page,
//! so the forms also work with scripting disabled.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use vitrin_core::{Cart, CartItem, Locale, MAX_LINE_QUANTITY, ProductId};

use crate::cart_store;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Event fired after every cart mutation; the header badge listens for it.
const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub href: String,
}

impl CartItemView {
    fn new(item: &CartItem, locale: Locale) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.price.display(locale),
            line_total: item.line_total().display(locale),
            href: format!("/{locale}/products/{}", item.id),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_quantity: u64,
    pub total_amount: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, locale: Locale) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, locale))
                .collect(),
            total_quantity: cart.total_quantity(),
            total_amount: cart.total_amount().display(locale),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
///
/// A quantity of zero or less removes the line; above
/// [`MAX_LINE_QUANTITY`] is rejected.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid product id '{raw}'")))
}

fn parse_quantity(raw: &str) -> Result<i64> {
    let quantity: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid quantity '{raw}'")))?;
    if quantity > i64::from(MAX_LINE_QUANTITY) {
        return Err(AppError::BadRequest(format!(
            "quantity {quantity} exceeds {MAX_LINE_QUANTITY}"
        )));
    }
    Ok(quantity)
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub locale: Locale,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub locale: Locale,
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub locale: Locale,
    pub count: u64,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Respond to a cart mutation: the items fragment for HTMX, otherwise a
/// redirect back to the cart page.
fn items_response(headers: &HeaderMap, locale: Locale, cart: &Cart) -> Response {
    if !is_htmx(headers) {
        return Redirect::to(&format!("/{locale}/cart")).into_response();
    }

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate {
            locale,
            cart: CartView::new(cart, locale),
        },
    )
        .into_response()
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(Path(locale): Path<Locale>, session: Session) -> Result<impl IntoResponse> {
    let cart = cart_store::load(&session).await?;

    Ok(CartShowTemplate {
        locale,
        cart: CartView::new(&cart, locale),
    })
}

/// Add one unit of a product to the cart.
///
/// The product is looked up in the catalog so the line carries its current
/// title, price and image. Returns the count badge with an HTMX trigger.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    Path(locale): Path<Locale>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let product = state.catalog().product(id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::NotFound(format!("product {id}"))
        } else {
            e.into()
        }
    })?;

    let mut cart = cart_store::load(&session).await?;
    cart.add(&product);
    cart_store::save(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", &id.to_string())]),
    );

    if !is_htmx(&headers) {
        return Ok(Redirect::to(&format!("/{locale}/cart")).into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate {
            locale,
            count: cart.total_quantity(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
#[instrument(skip(session, headers))]
pub async fn update(
    Path(locale): Path<Locale>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;
    let quantity = parse_quantity(&form.quantity)?;

    let mut cart = cart_store::load(&session).await?;
    cart.update_quantity(id, quantity);
    cart_store::save(&session, &cart).await?;

    Ok(items_response(&headers, locale, &cart))
}

/// Remove item from cart (HTMX).
#[instrument(skip(session, headers))]
pub async fn remove(
    Path(locale): Path<Locale>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = parse_product_id(&form.product_id)?;

    let mut cart = cart_store::load(&session).await?;
    cart.remove(id);
    cart_store::save(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", &id.to_string())]),
    );

    Ok(items_response(&headers, locale, &cart))
}

/// Empty the cart (HTMX).
#[instrument(skip(session, headers))]
pub async fn clear(
    Path(locale): Path<Locale>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    cart_store::clear(&session).await?;
    add_breadcrumb("cart", "Cleared cart", None);

    Ok(items_response(&headers, locale, &Cart::new()))
}

/// Cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(Path(locale): Path<Locale>, session: Session) -> Result<CartCountTemplate> {
    let cart = cart_store::load(&session).await?;

    Ok(CartCountTemplate {
        locale,
        count: cart.total_quantity(),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use vitrin_core::{Price, Product, Rating};

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_form_values() {
        assert_eq!(parse_product_id(" 7 ").ok(), Some(ProductId::new(7)));
        assert!(matches!(parse_product_id("seven"), Err(AppError::BadRequest(_))));
        assert_eq!(parse_quantity("-1").ok(), Some(-1));
        assert!(matches!(parse_quantity(""), Err(AppError::BadRequest(_))));
        assert_eq!(parse_quantity("999").ok(), Some(999));
        assert!(matches!(parse_quantity("1000"), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_quantity("5000000000"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_cart_view_formats_for_locale() {
        let mut cart = Cart::new();
        let product = Product {
            id: ProductId::new(9),
            title: "WD 2TB Elements Portable External Hard Drive".to_string(),
            price: Price::from_cents(6400),
            description: String::new(),
            category: "electronics".to_string(),
            image: String::new(),
            rating: Rating::default(),
        };
        cart.add(&product);
        cart.add(&product);

        let view = CartView::new(&cart, Locale::Tr);
        assert_eq!(view.total_quantity, 2);
        assert_eq!(view.total_amount, "₺128,00");
        assert_eq!(view.items.first().map(|i| i.href.as_str()), Some("/tr/products/9"));

        let view = CartView::new(&cart, Locale::En);
        assert_eq!(view.total_amount, "₺128.00");
    }
}
