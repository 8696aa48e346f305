//! Content backend abstraction.

use serde_json::{Map, Value};

use crate::error::CmsError;
use crate::types::{CmsDocument, DocumentPage};

/// Read and write access to CMS collections.
///
/// Implemented by [`CmsClient`](crate::CmsClient) for the real GraphQL API
/// and by `MockCms` (feature `mock`) for tests.
pub trait ContentBackend: Send + Sync {
    /// List one page of documents in `collection`, starting after `after`.
    fn list_documents(
        &self,
        collection: &str,
        after: Option<&str>,
        first: u32,
    ) -> Result<DocumentPage, CmsError>;

    /// Fetch a single document.
    fn get_document(&self, collection: &str, relative_path: &str) -> Result<CmsDocument, CmsError>;

    /// Create a document with the given field values.
    fn create_document(
        &self,
        collection: &str,
        relative_path: &str,
        values: &Map<String, Value>,
    ) -> Result<(), CmsError>;

    /// Replace the field values of an existing document.
    fn update_document(
        &self,
        collection: &str,
        relative_path: &str,
        values: &Map<String, Value>,
    ) -> Result<(), CmsError>;

    /// List every document in `collection`, following cursors.
    fn list_all(&self, collection: &str, page_size: u32) -> Result<Vec<CmsDocument>, CmsError> {
        let mut documents = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.list_documents(collection, cursor.as_deref(), page_size)?;
            documents.extend(page.documents);
            match page.next_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => break,
            }
        }
        Ok(documents)
    }
}
