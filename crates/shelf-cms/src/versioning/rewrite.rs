//! Rewriting internal references into a version snapshot.

use serde_json::{Map, Value};

/// Directory holding version snapshots.
pub const VERSIONS_DIR: &str = "_versions";

/// Field names whose string values are document references.
const REFERENCE_KEYS: &[&str] = &["slug", "url", "href", "link"];

/// Rewrites references into the docs tree so they point at a version.
///
/// - `content/docs/guide.mdx` → `content/docs/_versions/1.0/guide.mdx`
/// - `/docs/guide#setup` → `/docs/_versions/1.0/guide#setup`
///
/// External URLs, anchors and references that are already versioned are
/// left alone.
#[derive(Clone, Debug)]
pub struct ReferenceRewriter {
    content_root: String,
    route_prefix: String,
    version: String,
}

impl ReferenceRewriter {
    #[must_use]
    pub fn new(content_root: &str, route_prefix: &str, version: &str) -> Self {
        Self {
            content_root: content_root.trim_matches('/').to_owned(),
            route_prefix: route_prefix.trim_end_matches('/').to_owned(),
            version: version.to_owned(),
        }
    }

    /// Rewrite references anywhere in a document's field values.
    pub fn rewrite_values(&self, values: &mut Map<String, Value>) {
        for (key, value) in values.iter_mut() {
            self.rewrite_field(key, value);
        }
    }

    fn rewrite_field(&self, key: &str, value: &mut Value) {
        let is_reference = REFERENCE_KEYS.contains(&key);
        match value {
            Value::String(s) if is_reference => {
                if let Some(rewritten) = self.rewrite_reference(s) {
                    *s = rewritten;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.rewrite_field(key, item);
                }
            }
            Value::Object(map) => self.rewrite_values(map),
            _ => {}
        }
    }

    /// Rewritten reference, or `None` if it stays unchanged.
    #[must_use]
    pub fn rewrite_reference(&self, reference: &str) -> Option<String> {
        if is_external(reference) {
            return None;
        }

        let split = reference.find(['#', '?']).unwrap_or(reference.len());
        let (base, suffix) = reference.split_at(split);

        let rewritten = self
            .rewrite_document_path(base)
            .or_else(|| self.rewrite_route(base))?;
        Some(format!("{rewritten}{suffix}"))
    }

    fn rewrite_document_path(&self, base: &str) -> Option<String> {
        if self.content_root.is_empty() {
            return None;
        }
        let rel = base
            .trim_start_matches('/')
            .strip_prefix(&self.content_root)?
            .strip_prefix('/')?;
        if rel.is_empty() || is_versioned(rel) {
            return None;
        }
        Some(format!("{}/{VERSIONS_DIR}/{}/{rel}", self.content_root, self.version))
    }

    fn rewrite_route(&self, base: &str) -> Option<String> {
        if !base.starts_with('/') {
            return None;
        }
        let rest = base.strip_prefix(&self.route_prefix)?;
        let rel = match rest {
            "" | "/" => "",
            _ => rest.strip_prefix('/')?,
        };
        if is_versioned(rel) || rel == VERSIONS_DIR {
            return None;
        }
        let rel = rel.trim_end_matches('/');
        if rel.is_empty() {
            Some(format!("{}/{VERSIONS_DIR}/{}", self.route_prefix, self.version))
        } else {
            Some(format!("{}/{VERSIONS_DIR}/{}/{rel}", self.route_prefix, self.version))
        }
    }
}

/// Whether a path relative to the docs root lies in a version snapshot.
pub fn is_versioned(relative_path: &str) -> bool {
    relative_path
        .trim_start_matches('/')
        .strip_prefix(VERSIONS_DIR)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn is_external(reference: &str) -> bool {
    reference.is_empty()
        || reference.starts_with('#')
        || reference.starts_with("//")
        || reference.contains("://")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn rewriter() -> ReferenceRewriter {
        ReferenceRewriter::new("content/docs", "/docs", "1.0")
    }

    #[test]
    fn test_rewrite_document_reference() {
        assert_eq!(
            rewriter().rewrite_reference("content/docs/guide/intro.mdx").as_deref(),
            Some("content/docs/_versions/1.0/guide/intro.mdx")
        );
    }

    #[test]
    fn test_rewrite_route_keeps_fragment() {
        let r = rewriter();

        assert_eq!(
            r.rewrite_reference("/docs/guide#setup").as_deref(),
            Some("/docs/_versions/1.0/guide#setup")
        );
        assert_eq!(r.rewrite_reference("/docs").as_deref(), Some("/docs/_versions/1.0"));
        assert_eq!(r.rewrite_reference("/docs/").as_deref(), Some("/docs/_versions/1.0"));
    }

    #[test]
    fn test_untouched_references() {
        let r = rewriter();

        assert_eq!(r.rewrite_reference("https://example.com/docs/x"), None);
        assert_eq!(r.rewrite_reference("#anchor"), None);
        assert_eq!(r.rewrite_reference("/blog/post"), None);
        assert_eq!(r.rewrite_reference("/docsearch"), None);
        assert_eq!(r.rewrite_reference("/docs/_versions/0.9/guide"), None);
        assert_eq!(r.rewrite_reference("content/docs/_versions/0.9/a.mdx"), None);
        assert_eq!(r.rewrite_reference("mailto:team@example.com"), None);
    }

    #[test]
    fn test_rewrite_values_nested() {
        let mut values = json!({
            "title": "/docs/not-a-reference",
            "items": [
                {"title": "Intro", "slug": "content/docs/intro.mdx"},
                {"title": "Group", "items": [{"href": "/docs/guide"}]},
                {"title": "Ext", "href": "https://github.com"}
            ],
            "body": {"type": "root", "children": [
                {"type": "a", "url": "/docs/faq", "children": []}
            ]}
        })
        .as_object()
        .cloned()
        .unwrap();

        rewriter().rewrite_values(&mut values);

        assert_eq!(
            Value::Object(values),
            json!({
                "title": "/docs/not-a-reference",
                "items": [
                    {"title": "Intro", "slug": "content/docs/_versions/1.0/intro.mdx"},
                    {"title": "Group", "items": [{"href": "/docs/_versions/1.0/guide"}]},
                    {"title": "Ext", "href": "https://github.com"}
                ],
                "body": {"type": "root", "children": [
                    {"type": "a", "url": "/docs/_versions/1.0/faq", "children": []}
                ]}
            })
        );
    }

    #[test]
    fn test_root_route_prefix() {
        let r = ReferenceRewriter::new("content/docs", "/", "2");

        assert_eq!(r.rewrite_reference("/intro").as_deref(), Some("/_versions/2/intro"));
    }

    #[test]
    fn test_is_versioned() {
        assert!(is_versioned("_versions/1.0/intro.mdx"));
        assert!(!is_versioned("_versions.mdx"));
        assert!(!is_versioned("guide/_versions/1/x.mdx"));
    }
}
