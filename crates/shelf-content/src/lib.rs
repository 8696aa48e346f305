//! Rich-text rendering for CMS documents.
//!
//! Documents are stored in the CMS as a JSON syntax tree (headings,
//! paragraphs, lists, tables, code blocks and embedded components). This
//! crate parses that tree into [`Node`] and renders it to HTML with
//! [`RichTextRenderer`], collecting a table of contents on the way.
//!
//! Embedded components (`mdxJsxFlowElement`) are rendered by implementations
//! of [`Component`] registered on the renderer. `Callout`, `Accordion`,
//! `AccordionBlock` and `Youtube` are registered by default.

mod components;
mod escape;
mod node;
mod renderer;
mod text;
mod toc;

pub use components::{Accordion, AccordionBlock, Callout, Youtube};
pub use escape::{escape_html, slugify};
pub use node::{HeadingLevel, Node, TextLeaf};
pub use renderer::{Component, RenderContext, RenderResult, RichTextRenderer};
pub use text::plain_text;
pub use toc::{TocEntry, TocNode, limit_depth, outline};
