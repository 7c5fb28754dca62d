//! Locale prefix redirect.
//!
//! Every page is served under `/{locale}`. Requests for a path without a
//! supported prefix are redirected to the same path under the default locale,
//! query string included.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use vitrin_core::Locale;

/// Paths served without a locale prefix.
const UNLOCALIZED_PREFIXES: [&str; 3] = ["/health", "/static/", "/sitemap.xml"];

/// Redirect unprefixed paths to the default locale.
pub async fn locale_redirect_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if Locale::prefixes(path) || UNLOCALIZED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    let target = localized_path(Locale::default(), path, request.uri().query());
    tracing::debug!(from = path, to = %target, "Redirecting to localized path");
    Redirect::temporary(&target).into_response()
}

/// Build `/{locale}{path}?{query}`; the bare root maps to `/{locale}`.
fn localized_path(locale: Locale, path: &str, query: Option<&str>) -> String {
    let mut target = format!("/{locale}");
    if path != "/" {
        target.push_str(path);
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    target
}
