//! Storefront locales.
//!
//! Every page lives under a locale prefix (`/tr/...`, `/en/...`). Turkish is
//! the default and the redirect target for unprefixed paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a locale code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// A supported storefront locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Self; 2] = [Self::Tr, Self::En];

    /// The URL segment / `lang` attribute value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }

    /// Check whether a request path already carries a locale prefix.
    ///
    /// Matches `/tr` and `/tr/...`, not `/track`.
    #[must_use]
    pub fn prefixes(path: &str) -> bool {
        Self::ALL.iter().any(|locale| {
            path.strip_prefix('/')
                .and_then(|rest| rest.strip_prefix(locale.code()))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            other => Err(LocaleError(other.to_string())),
        }
    }
}
