//! HTML escaping and heading anchors.

use std::collections::{HashMap, HashSet};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Convert heading text to an anchor slug.
///
/// Letters and digits are kept (lowercased), runs of whitespace, dashes and
/// underscores collapse to one dash, everything else is dropped.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Hands out unique anchor ids within one document.
#[derive(Debug, Default)]
pub(crate) struct AnchorIds {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl AnchorIds {
    /// `intro`, then `intro-1`, `intro-2`, ... for repeated headings.
    pub(crate) fn next(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base.push_str("section");
        }
        let count = self.counts.entry(base.clone()).or_default();
        let mut id = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        // A literal heading like "Usage 1" may already own `usage-1`.
        while self.issued.contains(&id) {
            *count += 1;
            id = format!("{base}-{count}");
        }
        *count += 1;
        self.issued.insert(id.clone());
        id
    }
}
