//! Product route handlers.
//!
//! The listing's filters are read from the query string on every request and
//! merged over the defaults, so a shared link reproduces the same view.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;
use url::form_urlencoded;
use vitrin_core::{
    DEFAULT_MAX_PRICE, FilterUpdate, Locale, PRODUCTS_PER_PAGE, PageLink, Pagination, Product,
    ProductFilters, ProductId, SortBy,
};

use crate::error::add_breadcrumb;
use crate::filters;
use crate::state::AppState;

/// Related products shown under a product.
const RELATED_PRODUCT_COUNT: usize = 4;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub rating: String,
    pub rating_count: u32,
    pub href: String,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, locale: Locale) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(locale),
            category: product.category.clone(),
            image: product.image.clone(),
            rating: format!("{:.1}", product.rating.rate),
            rating_count: product.rating.count,
            href: format!("/{locale}/products/{}", product.id),
        }
    }
}

/// A `<select>` option.
#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One entry in the page strip; `number` is `None` for a gap.
#[derive(Clone)]
pub struct PageLinkView {
    pub number: Option<usize>,
    pub href: String,
    pub current: bool,
}

/// Listing query parameters.
///
/// Everything arrives as a string so a bad value is dropped instead of
/// rejecting the whole request.
#[derive(Debug, Default)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub clear: Option<String>,
}

impl ListingQuery {
    /// Parse a raw query string. Unknown keys are skipped and a repeated key
    /// keeps its last value.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "category" => &mut query.category,
                "min_price" => &mut query.min_price,
                "max_price" => &mut query.max_price,
                "sort" => &mut query.sort,
                "page" => &mut query.page,
                "clear" => &mut query.clear,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        query
    }

    /// Filters for this request: defaults with the parseable fields merged in.
    #[must_use]
    pub fn filters(&self) -> ProductFilters {
        let mut filters = ProductFilters::default();

        if self.clear.as_deref().is_some_and(is_truthy) {
            filters.reset();
            return filters;
        }

        let mut update = FilterUpdate::default();
        if let Some(category) = &self.category {
            update = update.category(category.trim());
        }
        if let Some(min_price) = self.min_price.as_deref().and_then(parse_price) {
            update = update.min_price(min_price);
        }
        if let Some(max_price) = self.max_price.as_deref().and_then(parse_price) {
            update = update.max_price(max_price);
        }
        if let Some(sort_by) = self.sort.as_deref().and_then(|s| s.trim().parse().ok()) {
            update = update.sort_by(sort_by);
        }

        filters.apply(update);
        filters
    }

    /// Requested page, 1 if absent or unparseable.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "on")
}

fn parse_price(raw: &str) -> Option<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|price| !price.is_sign_negative())
}

/// Listing URL carrying the non-default filters and the page.
#[must_use]
pub fn listing_href(locale: Locale, filters: &ProductFilters, page: usize) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !filters.category.is_empty() {
        query.append_pair("category", &filters.category);
    }
    if !filters.min_price.is_zero() {
        query.append_pair("min_price", &filters.min_price.normalize().to_string());
    }
    if filters.max_price != Decimal::from(DEFAULT_MAX_PRICE) {
        query.append_pair("max_price", &filters.max_price.normalize().to_string());
    }
    if filters.sort_by != SortBy::default() {
        query.append_pair("sort", filters.sort_by.as_str());
    }
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }

    let query = query.finish();
    if query.is_empty() {
        format!("/{locale}/products")
    } else {
        format!("/{locale}/products?{query}")
    }
}

const fn sort_label(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::NameAsc => "Name (A-Z)",
        SortBy::NameDesc => "Name (Z-A)",
        SortBy::PriceAsc => "Price (low to high)",
        SortBy::PriceDesc => "Price (high to low)",
    }
}

fn category_options(categories: &[String], selected: &str) -> Vec<OptionView> {
    std::iter::once(OptionView {
        value: String::new(),
        label: "All categories".to_string(),
        selected: selected.is_empty(),
    })
    .chain(categories.iter().map(|category| OptionView {
        value: category.clone(),
        label: filters::capitalize(category),
        selected: category == selected,
    }))
    .collect()
}

fn sort_options(selected: SortBy) -> Vec<OptionView> {
    SortBy::ALL
        .into_iter()
        .map(|sort_by| OptionView {
            value: sort_by.as_str().to_string(),
            label: sort_label(sort_by).to_string(),
            selected: sort_by == selected,
        })
        .collect()
}

fn page_links(locale: Locale, filters: &ProductFilters, pagination: &Pagination) -> Vec<PageLinkView> {
    pagination
        .visible_pages()
        .into_iter()
        .map(|link| match link {
            PageLink::Page(number) => PageLinkView {
                number: Some(number),
                href: listing_href(locale, filters, number),
                current: number == pagination.current(),
            },
            PageLink::Gap => PageLinkView {
                number: None,
                href: String::new(),
                current: false,
            },
        })
        .collect()
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub locale: Locale,
    pub products: Vec<ProductView>,
    pub total_products: usize,
    pub categories: Vec<OptionView>,
    pub sort_options: Vec<OptionView>,
    pub min_price: String,
    pub max_price: String,
    pub filters_active: bool,
    pub pages: Vec<PageLinkView>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub locale: Locale,
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub locale: Locale,
}

/// Render the 404 page.
#[must_use]
pub fn not_found_page(locale: Locale) -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate { locale }).into_response()
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(locale): Path<Locale>,
    RawQuery(raw): RawQuery,
) -> impl IntoResponse {
    let query = ListingQuery::parse(raw.as_deref());
    let filters = query.filters();

    let products = state
        .filtered_products(&filters)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch products");
            Arc::from(Vec::new())
        });

    let categories = state.categories().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch categories");
        Vec::new()
    });

    let pagination = Pagination::new(products.len(), PRODUCTS_PER_PAGE, query.page());

    ProductsIndexTemplate {
        locale,
        products: pagination
            .page_of(&products)
            .iter()
            .map(|p| ProductView::new(p, locale))
            .collect(),
        total_products: products.len(),
        categories: category_options(&categories, &filters.category),
        sort_options: sort_options(filters.sort_by),
        min_price: filters.min_price.normalize().to_string(),
        max_price: filters.max_price.normalize().to_string(),
        filters_active: !filters.is_default(),
        pages: page_links(locale, &filters, &pagination),
        prev_href: pagination
            .has_prev()
            .then(|| listing_href(locale, &filters, pagination.current() - 1)),
        next_href: pagination
            .has_next()
            .then(|| listing_href(locale, &filters, pagination.current() + 1)),
    }
}

/// Display product detail page.
///
/// Unknown or malformed ids render the 404 page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((locale, id)): Path<(Locale, String)>,
) -> Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return not_found_page(locale);
    };

    let product = match state.catalog().product(id).await {
        Ok(product) => product,
        Err(e) => {
            if !e.is_not_found() {
                tracing::error!(error = %e, "Failed to fetch product");
            }
            return not_found_page(locale);
        }
    };

    add_breadcrumb(
        "navigation",
        "Viewed product page",
        Some(&[("product_id", &id.to_string())]),
    );

    let related_products = match state.catalog().products_in_category(&product.category).await {
        Ok(products) => products
            .iter()
            .filter(|p| p.id != product.id)
            .take(RELATED_PRODUCT_COUNT)
            .map(|p| ProductView::new(p, locale))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch related products");
            Vec::new()
        }
    };

    ProductShowTemplate {
        locale,
        product: ProductView::new(&product, locale),
        related_products,
    }
    .into_response()
}
