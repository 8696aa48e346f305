//! Plain-text extraction for headings and the search index.

use serde_json::Value;

use crate::node::Node;

/// Prop keys whose string values are visible text.
const TEXT_PROPS: &[&str] = &["heading", "caption", "title"];

/// Collect the visible text of a tree.
///
/// Block elements are separated by newlines. Rich-text component props
/// (callout bodies, accordion text) are included.
#[must_use]
pub fn plain_text(node: &Node) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    out.truncate(out.trim_end().len());
    out
}

fn collect(node: &Node, out: &mut String) {
    match node {
        Node::Text(leaf) => out.push_str(&leaf.text),
        Node::CodeBlock { value, .. } | Node::Html { value } => {
            block_break(out);
            out.push_str(value);
            block_break(out);
        }
        Node::Image { alt, caption, .. } => {
            for text in [alt, caption].into_iter().flatten() {
                block_break(out);
                out.push_str(text);
            }
        }
        Node::Break { .. } => out.push('\n'),
        Node::Component {
            props, children, ..
        }
        | Node::InlineComponent {
            props, children, ..
        } => {
            for (key, value) in props {
                collect_prop(key, value, out);
            }
            for child in children {
                collect(child, out);
            }
        }
        Node::Link { children, .. } | Node::ListItemContent { children } => {
            for child in children {
                collect(child, out);
            }
        }
        _ => {
            let children = node.children();
            if children.is_empty() {
                return;
            }
            block_break(out);
            for child in children {
                collect(child, out);
            }
            block_break(out);
        }
    }
}

fn collect_prop(key: &str, value: &Value, out: &mut String) {
    match value {
        Value::String(s) if TEXT_PROPS.contains(&key) => {
            block_break(out);
            out.push_str(s);
            block_break(out);
        }
        Value::Object(map) if map.contains_key("type") => {
            if let Ok(node) = Node::from_value(value) {
                collect(&node, out);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                collect_prop(k, v, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_prop(key, item, out);
            }
        }
        _ => {}
    }
}

fn block_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
