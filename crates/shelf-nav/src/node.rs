//! Navigation tree as stored in the CMS table-of-contents documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error parsing a navigation tree.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Malformed JSON or a node that is neither a link nor a group.
    #[error("Invalid navigation tree: {0}")]
    Parse(#[from] serde_json::Error),
    /// Top-level value has no recognizable item list.
    #[error("Navigation tree must be an array or an object with `items`")]
    MissingItems,
}

/// Where a navigation leaf points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Internal document reference or route slug.
    Slug(String),
    /// External URL, shown but never selected.
    Href(String),
}

/// Navigation tree node.
///
/// JSON nodes with `items` are groups (a `slug` on a group is ignored).
/// Other nodes must carry a `slug` or an `href`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum NavigationNode {
    Leaf {
        title: String,
        target: LinkTarget,
        status: Option<String>,
    },
    Group {
        title: String,
        items: Vec<NavigationNode>,
        status: Option<String>,
    },
}

impl NavigationNode {
    /// Leaf pointing at a slug.
    #[must_use]
    pub fn page(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::Leaf {
            title: title.into(),
            target: LinkTarget::Slug(slug.into()),
            status: None,
        }
    }

    /// Leaf pointing at an external URL.
    #[must_use]
    pub fn link(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Leaf {
            title: title.into(),
            target: LinkTarget::Href(href.into()),
            status: None,
        }
    }

    /// Group of nodes.
    #[must_use]
    pub fn group(title: impl Into<String>, items: Vec<NavigationNode>) -> Self {
        Self::Group {
            title: title.into(),
            items,
            status: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Leaf { title, .. } | Self::Group { title, .. } => title,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Leaf { status, .. } | Self::Group { status, .. } => status.as_deref(),
        }
    }

    /// Child nodes (empty for leaves).
    #[must_use]
    pub fn items(&self) -> &[NavigationNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Group { items, .. } => items,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawNode {
    #[serde(alias = "label")]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<NavigationNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl TryFrom<RawNode> for NavigationNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if let Some(items) = raw.items {
            return Ok(Self::Group {
                title: raw.title,
                items,
                status: raw.status,
            });
        }
        let target = match (raw.slug, raw.href) {
            (Some(slug), _) if !slug.trim().is_empty() => LinkTarget::Slug(slug),
            (_, Some(href)) if !href.trim().is_empty() => LinkTarget::Href(href),
            _ => {
                return Err(format!(
                    "navigation node '{}' has no slug, href or items",
                    raw.title
                ));
            }
        };
        Ok(Self::Leaf {
            title: raw.title,
            target,
            status: raw.status,
        })
    }
}

impl From<NavigationNode> for RawNode {
    fn from(node: NavigationNode) -> Self {
        match node {
            NavigationNode::Leaf {
                title,
                target,
                status,
            } => {
                let (slug, href) = match target {
                    LinkTarget::Slug(s) => (Some(s), None),
                    LinkTarget::Href(h) => (None, Some(h)),
                };
                Self {
                    title,
                    slug,
                    href,
                    items: None,
                    status,
                }
            }
            NavigationNode::Group {
                title,
                items,
                status,
            } => Self {
                title,
                slug: None,
                href: None,
                items: Some(items),
                status,
            },
        }
    }
}

/// Validated navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavTree {
    items: Vec<NavigationNode>,
}

impl NavTree {
    #[must_use]
    pub fn new(items: Vec<NavigationNode>) -> Self {
        Self { items }
    }

    /// Parse a tree from a CMS table-of-contents value.
    ///
    /// Accepts a bare array of nodes or an object holding them under `items`.
    pub fn from_json(value: &Value) -> Result<Self, NavError> {
        let items = match value {
            Value::Array(_) => value,
            Value::Object(map) => map.get("items").ok_or(NavError::MissingItems)?,
            _ => return Err(NavError::MissingItems),
        };
        Ok(Self {
            items: Vec::<NavigationNode>::deserialize(items)?,
        })
    }

    /// Parse a tree from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, NavError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    #[must_use]
    pub fn items(&self) -> &[NavigationNode] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_groups_and_leaves() {
        let tree = NavTree::from_json(&json!([
            {"title": "Intro", "slug": "content/docs/intro.mdx"},
            {"title": "Guides", "items": [
                {"title": "GitHub", "href": "https://github.com"}
            ]}
        ]))
        .unwrap();

        assert_eq!(
            tree.items(),
            &[
                NavigationNode::page("Intro", "content/docs/intro.mdx"),
                NavigationNode::group(
                    "Guides",
                    vec![NavigationNode::link("GitHub", "https://github.com")]
                ),
            ]
        );
    }

    #[test]
    fn test_group_ignores_slug() {
        let tree = NavTree::from_json(&json!([
            {"title": "Guides", "slug": "guides", "items": []}
        ]))
        .unwrap();

        assert_eq!(tree.items(), &[NavigationNode::group("Guides", Vec::new())]);
    }

    #[test]
    fn test_node_without_target_is_rejected() {
        let err = NavTree::from_json(&json!([
            {"title": "Guides", "items": [{"title": "Orphan"}]}
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("Orphan"));
    }

    #[test]
    fn test_object_with_items_and_label_alias() {
        let tree = NavTree::from_json(&json!({
            "items": [{"label": "Intro", "slug": "intro", "status": "new"}]
        }))
        .unwrap();

        assert_eq!(tree.items()[0].title(), "Intro");
        assert_eq!(tree.items()[0].status(), Some("new"));
    }

    #[test]
    fn test_scalar_is_rejected() {
        assert!(matches!(NavTree::from_json(&json!(3)), Err(NavError::MissingItems)));
        assert!(matches!(NavTree::from_json(&json!({})), Err(NavError::MissingItems)));
    }

    #[test]
    fn test_serializes_back_to_cms_shape() {
        let node = NavigationNode::group("G", vec![NavigationNode::page("A", "a")]);

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json, json!({"title": "G", "items": [{"title": "A", "slug": "a"}]}));
    }
}
