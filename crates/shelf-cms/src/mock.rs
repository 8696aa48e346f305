//! Mock content backend for testing.
//!
//! Provides [`MockCms`] for unit testing without a running CMS.

use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::backend::ContentBackend;
use crate::error::CmsError;
use crate::types::{CmsDocument, DocumentPage};

type Key = (String, String);

/// Mutation recorded by [`MockCms`].
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Create {
        collection: String,
        relative_path: String,
    },
    Update {
        collection: String,
        relative_path: String,
        values: Map<String, Value>,
    },
}

/// Mock CMS for testing.
///
/// Stores documents in memory, ordered by collection and relative path.
/// Use the builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use serde_json::json;
/// use shelf_cms::{ContentBackend, MockCms};
///
/// let cms = MockCms::new()
///     .with_document("docs", "intro.mdx", json!({"title": "Intro"}))
///     .with_failure("docs", "_versions/1.0/intro.mdx");
///
/// let docs = cms.list_all("docs", 50).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockCms {
    documents: RwLock<BTreeMap<Key, Map<String, Value>>>,
    failures: RwLock<HashSet<Key>>,
    failing_lists: RwLock<HashSet<String>>,
    mutations: RwLock<Vec<Mutation>>,
}

impl MockCms {
    /// Create a new empty mock CMS.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. Non-object values are stored as an empty field map.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(
        self,
        collection: impl Into<String>,
        relative_path: impl Into<String>,
        values: Value,
    ) -> Self {
        let values = match values {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.documents
            .write()
            .unwrap()
            .insert((collection.into(), relative_path.into()), values);
        self
    }

    /// Make creates and updates of a document fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(
        self,
        collection: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert((collection.into(), relative_path.into()));
        self
    }

    /// Make listing a collection fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failing_list(self, collection: impl Into<String>) -> Self {
        self.failing_lists.write().unwrap().insert(collection.into());
        self
    }

    /// Mutations issued so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.read().unwrap().clone()
    }

    /// Current field values of a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn document(&self, collection: &str, relative_path: &str) -> Option<Map<String, Value>> {
        self.documents
            .read()
            .unwrap()
            .get(&(collection.to_owned(), relative_path.to_owned()))
            .cloned()
    }

    /// Number of documents in a collection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn count(&self, collection: &str) -> usize {
        self.documents
            .read()
            .unwrap()
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }

    fn check_failure(&self, key: &Key) -> Result<(), CmsError> {
        if self.failures.read().unwrap().contains(key) {
            return Err(CmsError::HttpResponse {
                status: 500,
                body: format!("injected failure for {}/{}", key.0, key.1),
            });
        }
        Ok(())
    }
}

impl ContentBackend for MockCms {
    fn list_documents(
        &self,
        collection: &str,
        after: Option<&str>,
        first: u32,
    ) -> Result<DocumentPage, CmsError> {
        if self.failing_lists.read().unwrap().contains(collection) {
            return Err(CmsError::HttpResponse {
                status: 503,
                body: format!("injected list failure for {collection}"),
            });
        }

        let start = match after {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| CmsError::InvalidResponse(format!("bad cursor '{cursor}'")))?,
            None => 0,
        };
        let first = usize::try_from(first.max(1)).unwrap_or(usize::MAX);

        let documents = self.documents.read().unwrap();
        let all: Vec<_> = documents
            .iter()
            .filter(|((c, _), _)| c == collection)
            .collect();
        let end = start.saturating_add(first).min(all.len());
        let page = all
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|((c, p), values)| CmsDocument::new(c.clone(), p.clone(), (*values).clone()))
            .collect();

        Ok(DocumentPage {
            documents: page,
            next_cursor: (end < all.len()).then(|| end.to_string()),
        })
    }

    fn get_document(&self, collection: &str, relative_path: &str) -> Result<CmsDocument, CmsError> {
        self.document(collection, relative_path)
            .map(|values| CmsDocument::new(collection, relative_path, values))
            .ok_or_else(|| CmsError::NotFound {
                collection: collection.to_owned(),
                relative_path: relative_path.to_owned(),
            })
    }

    fn create_document(
        &self,
        collection: &str,
        relative_path: &str,
        values: &Map<String, Value>,
    ) -> Result<(), CmsError> {
        let key = (collection.to_owned(), relative_path.to_owned());
        self.mutations.write().unwrap().push(Mutation::Create {
            collection: key.0.clone(),
            relative_path: key.1.clone(),
        });
        self.check_failure(&key)?;

        let mut documents = self.documents.write().unwrap();
        if documents.contains_key(&key) {
            return Err(CmsError::GraphQl(format!(
                "document {collection}/{relative_path} already exists"
            )));
        }
        documents.insert(key, values.clone());
        Ok(())
    }

    fn update_document(
        &self,
        collection: &str,
        relative_path: &str,
        values: &Map<String, Value>,
    ) -> Result<(), CmsError> {
        let key = (collection.to_owned(), relative_path.to_owned());
        self.mutations.write().unwrap().push(Mutation::Update {
            collection: key.0.clone(),
            relative_path: key.1.clone(),
            values: values.clone(),
        });
        self.check_failure(&key)?;

        let mut documents = self.documents.write().unwrap();
        match documents.get_mut(&key) {
            Some(existing) => {
                existing.clone_from(values);
                Ok(())
            }
            None => Err(CmsError::NotFound {
                collection: key.0,
                relative_path: key.1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn cms_with(count: usize) -> MockCms {
        (0..count).fold(MockCms::new(), |cms, i| {
            cms.with_document("docs", format!("page-{i:02}.mdx"), json!({"n": i}))
        })
    }

    #[test]
    fn test_list_documents_paginates() {
        let cms = cms_with(5).with_document("other", "x.json", json!({}));

        let first = cms.list_documents("docs", None, 2).unwrap();
        assert_eq!(first.documents.len(), 2);
        assert_eq!(first.next_cursor.as_deref(), Some("2"));

        let last = cms.list_documents("docs", Some("4"), 2).unwrap();
        assert_eq!(last.documents[0].relative_path, "page-04.mdx");
        assert_eq!(last.next_cursor, None);
    }

    #[test]
    fn test_list_all_follows_cursors() {
        let docs = cms_with(7).list_all("docs", 3).unwrap();

        assert_eq!(docs.len(), 7);
        assert_eq!(docs[6].relative_path, "page-06.mdx");
    }

    #[test]
    fn test_create_then_update() {
        let cms = MockCms::new();

        cms.create_document("docs", "a.mdx", &Map::new()).unwrap();
        let values = json!({"title": "A"}).as_object().cloned().unwrap();
        cms.update_document("docs", "a.mdx", &values).unwrap();

        assert_eq!(cms.document("docs", "a.mdx"), Some(values.clone()));
        assert_eq!(cms.mutations().len(), 2);
    }

    #[test]
    fn test_create_existing_fails() {
        let cms = cms_with(1);

        assert!(cms.create_document("docs", "page-00.mdx", &Map::new()).is_err());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let err = MockCms::new()
            .update_document("docs", "nope.mdx", &Map::new())
            .unwrap_err();

        assert!(matches!(err, CmsError::NotFound { .. }));
    }

    #[test]
    fn test_injected_failures() {
        let cms = MockCms::new()
            .with_failure("docs", "bad.mdx")
            .with_failing_list("toc");

        assert!(cms.create_document("docs", "bad.mdx", &Map::new()).is_err());
        assert!(cms.list_documents("toc", None, 10).is_err());
        assert_eq!(cms.count("docs"), 0);
    }
}
