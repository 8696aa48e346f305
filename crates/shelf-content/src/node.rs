//! Rich-text AST as delivered by the CMS.
//!
//! Documents arrive as JSON trees rooted at `{"type": "root"}`. Every element
//! carries a `type` tag; text leaves carry their marks as boolean flags.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heading level (`h1`..`h6`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Numeric level (1-6).
    #[must_use]
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    /// HTML tag name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

/// Text leaf with inline marks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct TextLeaf {
    /// Literal text.
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Rich-text node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "root")]
    Root {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "h1")]
    H1 {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "h2")]
    H2 {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "h3")]
    H3 {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "h4")]
    H4 {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "h5")]
    H5 {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "h6")]
    H6 {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "p")]
    Paragraph {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "blockquote")]
    Blockquote {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "ul")]
    BulletList {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "ol")]
    OrderedList {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "li")]
    ListItem {
        #[serde(default)]
        children: Vec<Node>,
    },
    /// List item content (inline wrapper inside `li`).
    #[serde(rename = "lic")]
    ListItemContent {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "a")]
    Link {
        url: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "img")]
    Image {
        url: String,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    #[serde(rename = "hr")]
    Rule {
        #[serde(default, skip_serializing)]
        children: Vec<Node>,
    },
    #[serde(rename = "break")]
    Break {
        #[serde(default, skip_serializing)]
        children: Vec<Node>,
    },
    #[serde(rename = "code_block")]
    CodeBlock {
        #[serde(default)]
        lang: Option<String>,
        #[serde(default)]
        value: String,
    },
    #[serde(rename = "table")]
    Table {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "tr")]
    TableRow {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "th")]
    TableHeaderCell {
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(rename = "td")]
    TableCell {
        #[serde(default)]
        children: Vec<Node>,
    },
    /// Raw HTML written by an editor. Rendered escaped.
    #[serde(rename = "html", alias = "html_inline")]
    Html {
        #[serde(default)]
        value: String,
    },
    #[serde(rename = "text")]
    Text(TextLeaf),
    /// Block-level embedded component.
    #[serde(rename = "mdxJsxFlowElement")]
    Component {
        name: String,
        #[serde(default)]
        props: Map<String, Value>,
        #[serde(default)]
        children: Vec<Node>,
    },
    /// Inline embedded component.
    #[serde(rename = "mdxJsxTextElement")]
    InlineComponent {
        name: String,
        #[serde(default)]
        props: Map<String, Value>,
        #[serde(default)]
        children: Vec<Node>,
    },
    #[serde(other)]
    Unknown,
}

impl Node {
    /// Parse a rich-text tree from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the value is not a valid node.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Plain text leaf, for building trees in code.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextLeaf {
            text: text.into(),
            ..TextLeaf::default()
        })
    }

    /// Heading level, if this is a heading.
    #[must_use]
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            Self::H1 { .. } => Some(HeadingLevel::H1),
            Self::H2 { .. } => Some(HeadingLevel::H2),
            Self::H3 { .. } => Some(HeadingLevel::H3),
            Self::H4 { .. } => Some(HeadingLevel::H4),
            Self::H5 { .. } => Some(HeadingLevel::H5),
            Self::H6 { .. } => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    /// Child nodes (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root { children }
            | Self::H1 { children }
            | Self::H2 { children }
            | Self::H3 { children }
            | Self::H4 { children }
            | Self::H5 { children }
            | Self::H6 { children }
            | Self::Paragraph { children }
            | Self::Blockquote { children }
            | Self::BulletList { children }
            | Self::OrderedList { children }
            | Self::ListItem { children }
            | Self::ListItemContent { children }
            | Self::Link { children, .. }
            | Self::Table { children }
            | Self::TableRow { children }
            | Self::TableHeaderCell { children }
            | Self::TableCell { children }
            | Self::Component { children, .. }
            | Self::InlineComponent { children, .. } => children,
            Self::Rule { .. }
            | Self::Break { .. }
            | Self::Image { .. }
            | Self::CodeBlock { .. }
            | Self::Html { .. }
            | Self::Text(_)
            | Self::Unknown => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_root_with_heading_and_text() {
        let value = json!({
            "type": "root",
            "children": [
                {"type": "h2", "children": [{"type": "text", "text": "Install"}]},
                {"type": "p", "children": [{"type": "text", "text": "Run it", "bold": true}]}
            ]
        });

        let node = Node::from_value(&value).unwrap();

        let Node::Root { children } = node else {
            panic!("expected root");
        };
        assert_eq!(children[0].heading_level(), Some(HeadingLevel::H2));
        assert_eq!(
            children[1].children()[0],
            Node::Text(TextLeaf {
                text: "Run it".to_owned(),
                bold: true,
                ..TextLeaf::default()
            })
        );
    }

    #[test]
    fn test_parse_unknown_type_is_tolerated() {
        let value = json!({"type": "root", "children": [{"type": "mermaid", "value": "graph"}]});

        let node = Node::from_value(&value).unwrap();

        assert_eq!(node.children(), &[Node::Unknown]);
    }

    #[test]
    fn test_parse_rule_with_placeholder_children() {
        let value = json!({"type": "hr", "children": [{"type": "text", "text": ""}]});

        let node = Node::from_value(&value).unwrap();

        assert!(matches!(node, Node::Rule { .. }));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_parse_component_props() {
        let value = json!({
            "type": "mdxJsxFlowElement",
            "name": "Callout",
            "props": {"type": "warning"}
        });

        let node = Node::from_value(&value).unwrap();

        let Node::Component { name, props, .. } = node else {
            panic!("expected component");
        };
        assert_eq!(name, "Callout");
        assert_eq!(props["type"], "warning");
    }

    #[test]
    fn test_heading_level_depth_and_tag() {
        assert_eq!(HeadingLevel::H3.depth(), 3);
        assert_eq!(HeadingLevel::H6.tag(), "h6");
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
    }
}
