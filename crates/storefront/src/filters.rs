//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Upper-cases the first character and leaves the rest alone.
///
/// Usage in templates: `{{ product.category|capitalize_first }}`
#[askama::filter_fn]
pub fn capitalize_first(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(capitalize(&value.to_string()))
}

/// `"men's clothing"` becomes `"Men's clothing"`.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("men's clothing"), "Men's clothing");
        assert_eq!(capitalize("electronics"), "Electronics");
        assert_eq!(capitalize("ıi"), "Ii");
        assert_eq!(capitalize(""), "");
    }
}
