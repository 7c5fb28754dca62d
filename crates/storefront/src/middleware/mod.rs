//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span)
//! 4. Session layer (tower-sessions, bounded moka store)
//! 5. Security headers (CSP, frame, sniffing)
//! 6. Locale redirect (unprefixed paths to `/tr`)

pub mod locale;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use locale::locale_redirect_middleware;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
