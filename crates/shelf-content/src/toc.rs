//! In-page table of contents.

use serde::Serialize;

use crate::node::HeadingLevel;

/// Heading collected while rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, serialized as `"h1"`..`"h6"`.
    #[serde(rename = "type")]
    pub level: HeadingLevel,
    /// Heading text.
    pub text: String,
    /// Anchor id of the rendered heading.
    pub id: String,
}

/// Heading with the entries nested below it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocNode {
    #[serde(flatten)]
    pub entry: TocEntry,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocNode>,
}

/// Nest a flat TOC by heading level.
///
/// An entry becomes a child of the closest preceding entry with a smaller
/// level. Skipped levels (h2 followed by h4) nest directly.
#[must_use]
pub fn outline(entries: &[TocEntry]) -> Vec<TocNode> {
    fn take_level(
        entries: &[TocEntry],
        pos: &mut usize,
        parent: Option<HeadingLevel>,
    ) -> Vec<TocNode> {
        let mut nodes = Vec::new();
        while let Some(entry) = entries.get(*pos) {
            if parent.is_some_and(|p| entry.level <= p) {
                break;
            }
            *pos += 1;
            let children = take_level(entries, pos, Some(entry.level));
            nodes.push(TocNode {
                entry: entry.clone(),
                children,
            });
        }
        nodes
    }

    let mut pos = 0;
    take_level(entries, &mut pos, None)
}

/// Keep entries at or above `max_level` (e.g. `H3` keeps h1-h3).
#[must_use]
pub fn limit_depth(entries: &[TocEntry], max_level: HeadingLevel) -> Vec<TocEntry> {
    entries
        .iter()
        .filter(|e| e.level <= max_level)
        .cloned()
        .collect()
}
