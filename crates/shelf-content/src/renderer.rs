//! HTML rendering of rich-text trees.

use std::collections::HashMap;
use std::fmt::Write;

use serde_json::{Map, Value};

use crate::components::{Accordion, AccordionBlock, Callout, Youtube};
use crate::escape::{AnchorIds, escape_html};
use crate::node::{HeadingLevel, Node, TextLeaf};
use crate::text::plain_text;
use crate::toc::TocEntry;

/// Result of rendering a document body.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Text of the first H1 (if title extraction was enabled).
    pub title: Option<String>,
    /// Headings in document order, excluding the extracted title.
    pub toc: Vec<TocEntry>,
    /// Problems found while rendering (unknown components, bad props).
    pub warnings: Vec<String>,
}

/// Embedded component renderer.
///
/// Registered on [`RichTextRenderer`] under the component name used in
/// `mdxJsxFlowElement` / `mdxJsxTextElement` nodes.
pub trait Component: Send + Sync {
    /// Write the component's HTML into `ctx`.
    fn render(&self, props: &Map<String, Value>, children: &[Node], ctx: &mut RenderContext<'_>);
}

/// Rich-text to HTML renderer with pluggable components.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shelf_content::RichTextRenderer;
///
/// let body = json!({"type": "root", "children": [
///     {"type": "h2", "children": [{"type": "text", "text": "Setup"}]}
/// ]});
/// let result = RichTextRenderer::new().render_value(&body).unwrap();
/// assert_eq!(result.html, r#"<h2 id="setup">Setup</h2>"#);
/// assert_eq!(result.toc[0].text, "Setup");
/// ```
pub struct RichTextRenderer {
    components: HashMap<String, Box<dyn Component>>,
    extract_title: bool,
}

impl Default for RichTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextRenderer {
    /// Create a renderer with the built-in components registered.
    #[must_use]
    pub fn new() -> Self {
        Self::without_components()
            .with_component("Callout", Callout)
            .with_component("Accordion", Accordion)
            .with_component("AccordionBlock", AccordionBlock)
            .with_component("Youtube", Youtube)
    }

    /// Create a renderer that knows no components.
    #[must_use]
    pub fn without_components() -> Self {
        Self {
            components: HashMap::new(),
            extract_title: false,
        }
    }

    /// Register (or replace) a component.
    #[must_use]
    pub fn with_component<C: Component + 'static>(
        mut self,
        name: impl Into<String>,
        component: C,
    ) -> Self {
        self.components.insert(name.into(), Box::new(component));
        self
    }

    /// Take the first H1 as the document title.
    ///
    /// The heading is still rendered but left out of the table of contents.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Render a parsed tree.
    pub fn render(&self, root: &Node) -> RenderResult {
        let mut ctx = RenderContext::new(self);
        ctx.render_node(root);
        RenderResult {
            html: ctx.out,
            title: ctx.title,
            toc: ctx.toc,
            warnings: ctx.warnings,
        }
    }

    /// Parse and render a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `value` is not a rich-text tree.
    pub fn render_value(&self, value: &Value) -> Result<RenderResult, serde_json::Error> {
        Ok(self.render(&Node::from_value(value)?))
    }
}

/// Output buffer and per-document state handed to components.
pub struct RenderContext<'r> {
    renderer: &'r RichTextRenderer,
    out: String,
    toc: Vec<TocEntry>,
    title: Option<String>,
    warnings: Vec<String>,
    anchors: AnchorIds,
}

impl<'r> RenderContext<'r> {
    fn new(renderer: &'r RichTextRenderer) -> Self {
        Self {
            renderer,
            out: String::with_capacity(4096),
            toc: Vec::new(),
            title: None,
            warnings: Vec::new(),
            anchors: AnchorIds::default(),
        }
    }

    /// Append raw HTML.
    pub fn push_str(&mut self, html: &str) {
        self.out.push_str(html);
    }

    /// Append escaped text.
    pub fn push_text(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    /// Record a rendering warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Render a list of nodes.
    pub fn render_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.render_node(node);
        }
    }

    /// Render a rich-text prop (a JSON tree nested in component props).
    ///
    /// Missing (`null`) values render nothing; malformed ones add a warning.
    pub fn render_rich_text(&mut self, value: &Value, prop: &str) {
        if value.is_null() {
            return;
        }
        match Node::from_value(value) {
            Ok(node) => self.render_node(&node),
            Err(e) => self.warn(format!("Invalid rich text in prop '{prop}': {e}")),
        }
    }

    fn render_node(&mut self, node: &Node) {
        match node {
            Node::Root { children } | Node::ListItemContent { children } => {
                self.render_nodes(children);
            }
            Node::H1 { children }
            | Node::H2 { children }
            | Node::H3 { children }
            | Node::H4 { children }
            | Node::H5 { children }
            | Node::H6 { children } => {
                if let Some(level) = node.heading_level() {
                    self.render_heading(level, node, children);
                }
            }
            Node::Paragraph { children } => self.wrap("p", children),
            Node::Blockquote { children } => self.wrap("blockquote", children),
            Node::BulletList { children } => self.wrap("ul", children),
            Node::OrderedList { children } => self.wrap("ol", children),
            Node::ListItem { children } => self.wrap("li", children),
            Node::TableRow { children } => self.wrap("tr", children),
            Node::TableHeaderCell { children } => self.wrap("th", children),
            Node::TableCell { children } => self.wrap("td", children),
            Node::Table { children } => {
                self.out.push_str(r#"<div class="table-wrapper"><table>"#);
                self.render_nodes(children);
                self.out.push_str("</table></div>");
            }
            Node::Link {
                url,
                title,
                children,
            } => self.render_link(url, title.as_deref(), children),
            Node::Image { url, alt, caption } => {
                self.render_image(url, alt.as_deref(), caption.as_deref());
            }
            Node::Rule { .. } => self.out.push_str("<hr>"),
            Node::Break { .. } => self.out.push_str("<br>"),
            Node::CodeBlock { lang, value } => self.render_code_block(lang.as_deref(), value),
            Node::Html { value } => self.push_text(value),
            Node::Text(leaf) => self.render_text(leaf),
            Node::Component {
                name,
                props,
                children,
            }
            | Node::InlineComponent {
                name,
                props,
                children,
            } => {
                let renderer = self.renderer;
                match renderer.components.get(name) {
                    Some(component) => component.render(props, children, self),
                    None => self.warn(format!("Unknown component: {name}")),
                }
            }
            Node::Unknown => {}
        }
    }

    fn wrap(&mut self, tag: &str, children: &[Node]) {
        let _ = write!(self.out, "<{tag}>");
        self.render_nodes(children);
        let _ = write!(self.out, "</{tag}>");
    }

    fn render_heading(&mut self, level: HeadingLevel, node: &Node, children: &[Node]) {
        let text = plain_text(node).trim().to_owned();
        let id = self.anchors.next(&text);

        let is_title =
            self.renderer.extract_title && level == HeadingLevel::H1 && self.title.is_none();
        if is_title {
            self.title = Some(text);
        } else {
            self.toc.push(TocEntry {
                level,
                text,
                id: id.clone(),
            });
        }

        let tag = level.tag();
        let _ = write!(self.out, r#"<{tag} id="{}">"#, escape_html(&id));
        self.render_nodes(children);
        let _ = write!(self.out, "</{tag}>");
    }

    fn render_link(&mut self, url: &str, title: Option<&str>, children: &[Node]) {
        if is_script_url(url) {
            self.warn(format!("Dropped link with script URL: {url}"));
            self.render_nodes(children);
            return;
        }

        let _ = write!(self.out, r#"<a href="{}""#, escape_html(url));
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            let _ = write!(self.out, r#" title="{}""#, escape_html(title));
        }
        if is_external(url) {
            self.out
                .push_str(r#" target="_blank" rel="noopener noreferrer""#);
        }
        self.out.push('>');
        self.render_nodes(children);
        self.out.push_str("</a>");
    }

    fn render_image(&mut self, url: &str, alt: Option<&str>, caption: Option<&str>) {
        let img = format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_html(url),
            escape_html(alt.unwrap_or_default())
        );
        match caption.filter(|c| !c.is_empty()) {
            Some(caption) => {
                let _ = write!(
                    self.out,
                    "<figure>{img}<figcaption>{}</figcaption></figure>",
                    escape_html(caption)
                );
            }
            None => self.out.push_str(&img),
        }
    }

    fn render_code_block(&mut self, lang: Option<&str>, value: &str) {
        match lang.filter(|l| !l.is_empty()) {
            Some(lang) => {
                let _ = write!(
                    self.out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(value)
                );
            }
            None => {
                let _ = write!(self.out, "<pre><code>{}</code></pre>", escape_html(value));
            }
        }
    }

    fn render_text(&mut self, leaf: &TextLeaf) {
        let marks = [
            (leaf.code, "code"),
            (leaf.bold, "strong"),
            (leaf.italic, "em"),
            (leaf.strikethrough, "del"),
            (leaf.underline, "u"),
        ];
        for (_, tag) in marks.iter().filter(|(on, _)| *on) {
            let _ = write!(self.out, "<{tag}>");
        }
        self.push_text(&leaf.text);
        for (_, tag) in marks.iter().rev().filter(|(on, _)| *on) {
            let _ = write!(self.out, "</{tag}>");
        }
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

fn is_script_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || lower.starts_with("data:text/html")
}
