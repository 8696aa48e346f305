//! Mapping CMS document references to site URL paths.

use percent_encoding::percent_decode_str;

const DOCUMENT_EXTENSIONS: &[&str] = &[".mdx", ".md", ".json"];

/// Normalize a URL path for comparison.
///
/// Percent-decodes, collapses repeated slashes, adds a leading slash and
/// drops a trailing one. Query strings and fragments are removed.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let mut out = String::with_capacity(decoded.len() + 1);
    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Resolves navigation slugs to URL paths.
///
/// - `content/docs/guide/intro.mdx` → `/docs/guide/intro`
/// - `content/docs/guide/index.mdx` → `/docs/guide`
/// - `guide/intro` → `/docs/guide/intro`
/// - `/about` → `/about`
#[derive(Clone, Debug)]
pub struct SlugResolver {
    route_prefix: String,
    content_root: String,
}

impl Default for SlugResolver {
    fn default() -> Self {
        Self::new("/docs", "content/docs")
    }
}

impl SlugResolver {
    /// Create a resolver for documents under `content_root` served at
    /// `route_prefix`.
    #[must_use]
    pub fn new(route_prefix: &str, content_root: &str) -> Self {
        let route_prefix = match normalize_path(route_prefix).as_str() {
            "/" => String::new(),
            p => p.to_owned(),
        };
        Self {
            route_prefix,
            content_root: content_root.trim_matches('/').to_owned(),
        }
    }

    /// Route prefix without trailing slash (empty when docs are at `/`).
    #[must_use]
    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    /// Content root without surrounding slashes.
    #[must_use]
    pub fn content_root(&self) -> &str {
        &self.content_root
    }

    /// Resolve a slug or document reference to a normalized URL path.
    #[must_use]
    pub fn resolve(&self, slug: &str) -> String {
        let slug = slug.trim();
        if slug.starts_with('/') {
            return normalize_path(slug);
        }

        let decoded = percent_decode_str(slug).decode_utf8_lossy();
        let rel = match decoded.strip_prefix(&self.content_root) {
            Some(rest)
                if !self.content_root.is_empty() && (rest.is_empty() || rest.starts_with('/')) =>
            {
                rest.trim_start_matches('/')
            }
            _ => &*decoded,
        };
        self.url_for_relative_path(rel)
    }

    /// URL path of a document given its path relative to the content root.
    #[must_use]
    pub fn url_for_relative_path(&self, relative_path: &str) -> String {
        let mut rel = relative_path.trim_matches('/');
        for ext in DOCUMENT_EXTENSIONS {
            if let Some(stem) = rel.strip_suffix(ext) {
                rel = stem;
                break;
            }
        }
        let rel = match rel {
            "index" => "",
            _ => rel.strip_suffix("/index").unwrap_or(rel),
        };
        normalize_path(&format!("{}/{rel}", self.route_prefix))
    }

    /// Path relative to the route prefix, if `url_path` lies under it.
    ///
    /// `/docs/guide/intro` → `Some("guide/intro")`, `/docs` → `Some("")`.
    #[must_use]
    pub fn relative_route<'a>(&self, url_path: &'a str) -> Option<&'a str> {
        let rest = url_path.strip_prefix(self.route_prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest.trim_matches('/'))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("docs//guide/"), "/docs/guide");
        assert_eq!(normalize_path("/docs/caf%C3%A9?x=1#top"), "/docs/café");
    }

    #[test]
    fn test_resolve_document_reference() {
        let resolver = SlugResolver::default();

        assert_eq!(resolver.resolve("content/docs/guide/intro.mdx"), "/docs/guide/intro");
        assert_eq!(resolver.resolve("content/docs/guide/index.mdx"), "/docs/guide");
        assert_eq!(resolver.resolve("content/docs/index.mdx"), "/docs");
    }

    #[test]
    fn test_resolve_plain_and_absolute_slugs() {
        let resolver = SlugResolver::default();

        assert_eq!(resolver.resolve("guide/intro"), "/docs/guide/intro");
        assert_eq!(resolver.resolve("/about/"), "/about");
        assert_eq!(resolver.resolve("content/docsearch"), "/docs/content/docsearch");
    }

    #[test]
    fn test_root_route_prefix() {
        let resolver = SlugResolver::new("/", "content/docs");

        assert_eq!(resolver.route_prefix(), "");
        assert_eq!(resolver.resolve("content/docs/index.mdx"), "/");
        assert_eq!(resolver.resolve("intro"), "/intro");
    }

    #[test]
    fn test_relative_route() {
        let resolver = SlugResolver::default();

        assert_eq!(resolver.relative_route("/docs/guide/intro"), Some("guide/intro"));
        assert_eq!(resolver.relative_route("/docs"), Some(""));
        assert_eq!(resolver.relative_route("/docsearch"), None);
    }
}
