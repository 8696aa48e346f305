//! Document operations for the CMS GraphQL API.

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use super::CmsClient;
use crate::backend::ContentBackend;
use crate::error::CmsError;
use crate::types::{CmsDocument, DocumentPage};

const LIST_QUERY: &str = r"query ListDocuments($collection: String!, $first: Float, $after: String) {
  collection(collection: $collection) {
    documents(first: $first, after: $after) {
      pageInfo { hasNextPage endCursor }
      edges { node { ... on Document { _sys { relativePath } _values } } }
    }
  }
}";

const GET_QUERY: &str = r"query GetDocument($collection: String!, $relativePath: String!) {
  document(collection: $collection, relativePath: $relativePath) {
    ... on Document { _sys { relativePath } _values }
  }
}";

const CREATE_MUTATION: &str = r"mutation CreateDocument($collection: String!, $relativePath: String!, $params: DocumentMutation!) {
  createDocument(collection: $collection, relativePath: $relativePath, params: $params) { __typename }
}";

const UPDATE_MUTATION: &str = r"mutation UpdateDocument($collection: String!, $relativePath: String!, $params: DocumentUpdateMutation!) {
  updateDocument(collection: $collection, relativePath: $relativePath, params: $params) { __typename }
}";

impl ContentBackend for CmsClient {
    fn list_documents(
        &self,
        collection: &str,
        after: Option<&str>,
        first: u32,
    ) -> Result<DocumentPage, CmsError> {
        debug!(collection, after, first, "Listing documents");
        let data = self.graphql(
            LIST_QUERY,
            json!({"collection": collection, "first": first, "after": after}),
        )?;
        parse_document_page(collection, &data)
    }

    fn get_document(&self, collection: &str, relative_path: &str) -> Result<CmsDocument, CmsError> {
        let data = self.graphql(
            GET_QUERY,
            json!({"collection": collection, "relativePath": relative_path}),
        )?;
        match data.get("document") {
            Some(node) if !node.is_null() => parse_node(collection, node),
            _ => Err(CmsError::NotFound {
                collection: collection.to_owned(),
                relative_path: relative_path.to_owned(),
            }),
        }
    }

    fn create_document(
        &self,
        collection: &str,
        relative_path: &str,
        values: &Map<String, Value>,
    ) -> Result<(), CmsError> {
        info!(collection, relative_path, "Creating document");
        self.graphql(
            CREATE_MUTATION,
            json!({
                "collection": collection,
                "relativePath": relative_path,
                "params": { collection: values },
            }),
        )?;
        Ok(())
    }

    fn update_document(
        &self,
        collection: &str,
        relative_path: &str,
        values: &Map<String, Value>,
    ) -> Result<(), CmsError> {
        info!(collection, relative_path, "Updating document");
        self.graphql(
            UPDATE_MUTATION,
            json!({
                "collection": collection,
                "relativePath": relative_path,
                "params": { collection: values },
            }),
        )?;
        Ok(())
    }
}

fn parse_document_page(collection: &str, data: &Value) -> Result<DocumentPage, CmsError> {
    let connection = data.pointer("/collection/documents").ok_or_else(|| {
        CmsError::InvalidResponse(format!("no documents for collection '{collection}'"))
    })?;

    let documents = connection
        .get("edges")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|edge| edge.get("node"))
        .map(|node| parse_node(collection, node))
        .collect::<Result<Vec<_>, _>>()?;

    let page_info = connection.get("pageInfo");
    let has_next = page_info
        .and_then(|p| p.get("hasNextPage"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let next_cursor = has_next
        .then(|| page_info.and_then(|p| p.get("endCursor")).and_then(Value::as_str))
        .flatten()
        .map(str::to_owned);

    Ok(DocumentPage {
        documents,
        next_cursor,
    })
}

fn parse_node(collection: &str, node: &Value) -> Result<CmsDocument, CmsError> {
    let relative_path = node
        .pointer("/_sys/relativePath")
        .and_then(Value::as_str)
        .ok_or_else(|| CmsError::InvalidResponse("document without relativePath".to_owned()))?;
    let values = match node.get("_values") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    Ok(CmsDocument::new(collection, relative_path, values))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_document_page() {
        let data = json!({"collection": {"documents": {
            "pageInfo": {"hasNextPage": true, "endCursor": "c2"},
            "edges": [
                {"node": {"_sys": {"relativePath": "intro.mdx"}, "_values": {"title": "Intro"}}},
                {"node": {"_sys": {"relativePath": "faq.mdx"}}}
            ]
        }}});

        let page = parse_document_page("docs", &data).unwrap();

        assert_eq!(page.next_cursor.as_deref(), Some("c2"));
        assert_eq!(page.documents.len(), 2);
        assert_eq!(page.documents[0].str_field("title"), Some("Intro"));
        assert_eq!(page.documents[1].relative_path, "faq.mdx");
        assert!(page.documents[1].values.is_empty());
    }

    #[test]
    fn test_parse_last_page_has_no_cursor() {
        let data = json!({"collection": {"documents": {
            "pageInfo": {"hasNextPage": false, "endCursor": "c9"},
            "edges": []
        }}});

        let page = parse_document_page("docs", &data).unwrap();

        assert_eq!(page, DocumentPage::default());
    }

    #[test]
    fn test_parse_node_requires_relative_path() {
        let err = parse_node("docs", &json!({"_values": {}})).unwrap_err();

        assert!(matches!(err, CmsError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_page_without_collection() {
        assert!(parse_document_page("docs", &json!({})).is_err());
    }
}
