//! Built-in embedded components.

use serde_json::{Map, Value};

use crate::node::Node;
use crate::renderer::{Component, RenderContext};

const CALLOUT_VARIANTS: &[&str] = &["info", "warning", "success", "error", "idea", "lock", "api"];

const YOUTUBE_PREFIXES: &[&str] = &[
    "https://www.youtube.com/embed/",
    "https://www.youtube-nocookie.com/embed/",
];

fn str_prop<'a>(props: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    props
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Highlighted note box.
///
/// Props: `type` (one of the known variants, default `info`) and an optional
/// rich-text `body`. Without a body the element children are rendered.
pub struct Callout;

impl Component for Callout {
    fn render(&self, props: &Map<String, Value>, children: &[Node], ctx: &mut RenderContext<'_>) {
        let variant = match str_prop(props, "type") {
            Some(v) if CALLOUT_VARIANTS.contains(&v) => v,
            Some(v) => {
                ctx.warn(format!("Unknown callout type '{v}', using 'info'"));
                "info"
            }
            None => "info",
        };

        ctx.push_str(&format!(
            r#"<div class="callout callout-{variant}" role="note"><div class="callout-body">"#
        ));
        match props.get("body") {
            Some(body) if !body.is_null() => ctx.render_rich_text(body, "body"),
            _ => ctx.render_nodes(children),
        }
        ctx.push_str("</div></div>");
    }
}

/// Collapsible section.
///
/// Props: `heading`, rich-text `docText`, optional `image` src and
/// `fullWidth` flag.
pub struct Accordion;

impl Component for Accordion {
    fn render(&self, props: &Map<String, Value>, children: &[Node], ctx: &mut RenderContext<'_>) {
        render_accordion(props, children, ctx);
    }
}

fn render_accordion(props: &Map<String, Value>, children: &[Node], ctx: &mut RenderContext<'_>) {
    let full_width = props.get("fullWidth").and_then(Value::as_bool).unwrap_or(false);
    ctx.push_str(if full_width {
        r#"<details class="accordion accordion-full">"#
    } else {
        r#"<details class="accordion">"#
    });

    ctx.push_str("<summary>");
    ctx.push_text(str_prop(props, "heading").unwrap_or("Details"));
    ctx.push_str(r#"</summary><div class="accordion-body">"#);

    if let Some(src) = str_prop(props, "image") {
        ctx.push_str(r#"<img src=""#);
        ctx.push_text(src);
        ctx.push_str(r#"" alt="" loading="lazy">"#);
    }
    match props.get("docText") {
        Some(text) if !text.is_null() => ctx.render_rich_text(text, "docText"),
        _ => ctx.render_nodes(children),
    }
    ctx.push_str("</div></details>");
}

/// Group of accordions.
///
/// Props: `accordionItems`, a list of [`Accordion`] prop objects.
pub struct AccordionBlock;

impl Component for AccordionBlock {
    fn render(&self, props: &Map<String, Value>, _children: &[Node], ctx: &mut RenderContext<'_>) {
        let full_width = props.get("fullWidth").and_then(Value::as_bool).unwrap_or(false);
        ctx.push_str(if full_width {
            r#"<div class="accordion-block accordion-block-full">"#
        } else {
            r#"<div class="accordion-block">"#
        });

        let items = props
            .get("accordionItems")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for (i, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(item_props) => render_accordion(item_props, &[], ctx),
                None => ctx.warn(format!("AccordionBlock item {i} is not an object")),
            }
        }
        ctx.push_str("</div>");
    }
}

/// Embedded YouTube player.
///
/// Props: `embedSrc` (must be a YouTube embed URL) and optional `caption`.
pub struct Youtube;

impl Component for Youtube {
    fn render(&self, props: &Map<String, Value>, _children: &[Node], ctx: &mut RenderContext<'_>) {
        let Some(src) = str_prop(props, "embedSrc") else {
            ctx.warn("Youtube component without embedSrc");
            return;
        };
        if !YOUTUBE_PREFIXES.iter().any(|p| src.starts_with(p)) {
            ctx.warn(format!("Youtube embedSrc is not a YouTube embed URL: {src}"));
            return;
        }

        ctx.push_str(r#"<figure class="video"><div class="video-frame"><iframe src=""#);
        ctx.push_text(src);
        ctx.push_str(r#"" title=""#);
        ctx.push_text(str_prop(props, "caption").unwrap_or("YouTube video"));
        ctx.push_str(
            r#"" loading="lazy" allow="accelerometer; encrypted-media; picture-in-picture" allowfullscreen></iframe></div>"#,
        );
        if let Some(caption) = str_prop(props, "caption") {
            ctx.push_str("<figcaption>");
            ctx.push_text(caption);
            ctx.push_str("</figcaption>");
        }
        ctx.push_str("</figure>");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::RichTextRenderer;

    fn render(component: serde_json::Value) -> (String, Vec<String>) {
        let body = json!({"type": "root", "children": [component]});
        let result = RichTextRenderer::new().render_value(&body).unwrap();
        (result.html, result.warnings)
    }

    fn rich(text: &str) -> serde_json::Value {
        json!({"type": "root", "children": [
            {"type": "p", "children": [{"type": "text", "text": text}]}
        ]})
    }

    #[test]
    fn test_callout_with_body() {
        let (html, warnings) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "Callout",
            "props": {"type": "warning", "body": rich("Careful")}
        }));

        assert_eq!(
            html,
            r#"<div class="callout callout-warning" role="note"><div class="callout-body"><p>Careful</p></div></div>"#
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_callout_unknown_type_falls_back_to_info() {
        let (html, warnings) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "Callout",
            "props": {"type": "shout"},
            "children": [{"type": "text", "text": "Hi"}]
        }));

        assert!(html.starts_with(r#"<div class="callout callout-info""#));
        assert!(html.contains("Hi"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_accordion() {
        let (html, _) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "Accordion",
            "props": {"heading": "FAQ <1>", "docText": rich("Answer")}
        }));

        assert_eq!(
            html,
            r#"<details class="accordion"><summary>FAQ &lt;1&gt;</summary><div class="accordion-body"><p>Answer</p></div></details>"#
        );
    }

    #[test]
    fn test_accordion_block_renders_each_item() {
        let (html, warnings) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "AccordionBlock",
            "props": {"accordionItems": [
                {"heading": "One", "docText": rich("1")},
                {"heading": "Two", "docText": rich("2")},
                "bogus"
            ]}
        }));

        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.starts_with(r#"<div class="accordion-block">"#));
        assert_eq!(warnings, vec!["AccordionBlock item 2 is not an object".to_owned()]);
    }

    #[test]
    fn test_youtube_embed() {
        let (html, _) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "Youtube",
            "props": {"embedSrc": "https://www.youtube.com/embed/abc", "caption": "Demo"}
        }));

        assert!(html.contains(r#"<iframe src="https://www.youtube.com/embed/abc" title="Demo""#));
        assert!(html.ends_with("<figcaption>Demo</figcaption></figure>"));
    }

    #[test]
    fn test_youtube_rejects_foreign_src() {
        let (html, warnings) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "Youtube",
            "props": {"embedSrc": "https://evil.example/embed"}
        }));

        assert_eq!(html, "");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_invalid_rich_text_prop_warns() {
        let (html, warnings) = render(json!({
            "type": "mdxJsxFlowElement",
            "name": "Callout",
            "props": {"body": 42}
        }));

        assert_eq!(
            html,
            r#"<div class="callout callout-info" role="note"><div class="callout-body"></div></div>"#
        );
        assert_eq!(warnings.len(), 1);
    }
}
