//! XML sitemap.

use askama::Template;
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use vitrin_core::Locale;

use crate::error::Result;
use crate::state::AppState;

/// One `<url>` entry.
#[derive(Clone)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
}

/// Sitemap template.
#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub urls: Vec<SitemapUrl>,
}

/// Every public URL for every locale: home, listing, then each product.
///
/// Product URLs are left out if the catalog is unreachable.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response> {
    let base_url = &state.config().base_url;
    let lastmod = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let product_ids = state.catalog().product_ids().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Sitemap built without products");
        Vec::new()
    });

    let urls = Locale::ALL
        .into_iter()
        .flat_map(|locale| {
            [format!("/{locale}"), format!("/{locale}/products")]
                .into_iter()
                .chain(
                    product_ids
                        .iter()
                        .map(move |id| format!("/{locale}/products/{id}")),
                )
        })
        .map(|path| SitemapUrl {
            loc: format!("{base_url}{path}"),
            lastmod: lastmod.clone(),
        })
        .collect();

    let body = SitemapTemplate { urls }.render()?;

    Ok(([(CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response())
}
