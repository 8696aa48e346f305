//! CommonMark descriptions.

use pulldown_cmark::{Event, Options, Parser, html};

/// Render a CommonMark description to HTML.
///
/// Raw HTML in the source is escaped rather than passed through.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
