//! Utility functions and helpers.

pub mod http;
pub mod logging;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}
