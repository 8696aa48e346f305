//! Building the static index from rendered pages.

use crate::index::{SearchDocument, SearchIndex};

/// Maximum excerpt length in characters.
const EXCERPT_CHARS: usize = 160;

/// Collects pages into a [`SearchIndex`].
#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    documents: Vec<SearchDocument>,
}

impl SearchIndexBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page by URL, title and plain text.
    ///
    /// A page already added under the same URL is replaced.
    pub fn add_page(&mut self, url: &str, title: &str, text: &str) -> &mut Self {
        let doc = SearchDocument::new(url.to_owned(), title.to_owned(), excerpt(text), text);
        match self.documents.iter_mut().find(|d| d.url == url) {
            Some(existing) => *existing = doc,
            None => self.documents.push(doc),
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn build(self) -> SearchIndex {
        SearchIndex::new(self.documents)
    }
}

/// First words of `text`, cut at a word boundary.
fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= EXCERPT_CHARS {
        return collapsed;
    }

    let cut: String = collapsed.chars().take(EXCERPT_CHARS).collect();
    let end = cut.rfind(' ').unwrap_or(cut.len());
    format!("{}…", cut[..end].trim_end_matches([',', '.', ';', ':']))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_excerpt_short_text_is_collapsed() {
        assert_eq!(excerpt("  One\n\ntwo   three "), "One two three");
    }

    #[test]
    fn test_excerpt_cuts_at_word_boundary() {
        let text = "word ".repeat(60);

        let result = excerpt(&text);

        assert!(result.ends_with("word…"));
        assert!(result.chars().count() <= EXCERPT_CHARS + 1);
    }

    #[test]
    fn test_add_page_replaces_same_url() {
        let mut builder = SearchIndexBuilder::new();
        builder.add_page("/docs/a", "Old", "old text");
        builder.add_page("/docs/b", "B", "b");
        builder.add_page("/docs/a", "New", "new text");

        let index = builder.build();

        assert_eq!(index.len(), 2);
        assert_eq!(index.documents()[0].title, "New");
        assert_eq!(index.documents()[0].excerpt, "new text");
    }
}
