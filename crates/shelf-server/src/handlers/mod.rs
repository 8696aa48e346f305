//! HTTP request handlers.

pub(crate) mod cache;
pub(crate) mod documents;
pub(crate) mod fields;
pub(crate) mod navigation;
pub(crate) mod pages;
pub(crate) mod reference;
pub(crate) mod search;
pub(crate) mod versions;

/// Convert a wildcard route capture to a URL path with a leading slash.
pub(crate) fn to_url_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}
