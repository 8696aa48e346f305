//! CMS document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document as stored in a CMS collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsDocument {
    pub collection: String,
    /// Path inside the collection, e.g. `guides/install.mdx`.
    pub relative_path: String,
    /// Raw field values.
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl CmsDocument {
    #[must_use]
    pub fn new(
        collection: impl Into<String>,
        relative_path: impl Into<String>,
        values: Map<String, Value>,
    ) -> Self {
        Self {
            collection: collection.into(),
            relative_path: relative_path.into(),
            values,
        }
    }

    /// String field value.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

/// One page of a cursor-paginated listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentPage {
    pub documents: Vec<CmsDocument>,
    /// Cursor for the next page, `None` on the last page.
    pub next_cursor: Option<String>,
}

/// Identifies a content snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version_number: String,
    #[serde(default)]
    pub version_label: String,
}

impl VersionRecord {
    #[must_use]
    pub fn new(version_number: impl Into<String>, version_label: impl Into<String>) -> Self {
        Self {
            version_number: version_number.into(),
            version_label: version_label.into(),
        }
    }

    /// Read a record from a document of the versions collection.
    ///
    /// Returns `None` if the document has no version number.
    #[must_use]
    pub fn from_document(doc: &CmsDocument) -> Option<Self> {
        let version_number = doc.str_field("versionNumber")?.trim();
        if version_number.is_empty() {
            return None;
        }
        Some(Self {
            version_number: version_number.to_owned(),
            version_label: doc.str_field("versionLabel").unwrap_or_default().to_owned(),
        })
    }

    /// Field values for the versions collection.
    #[must_use]
    pub fn to_values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("versionNumber".to_owned(), Value::String(self.version_number.clone()));
        values.insert("versionLabel".to_owned(), Value::String(self.version_label.clone()));
        values
    }

    /// Path of the record document inside the versions collection.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("{}.json", self.version_number)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_version_record_from_document() {
        let doc = CmsDocument::new(
            "version",
            "1.2.json",
            json!({"versionNumber": " 1.2 ", "versionLabel": "Spring"})
                .as_object()
                .cloned()
                .unwrap(),
        );

        assert_eq!(VersionRecord::from_document(&doc), Some(VersionRecord::new("1.2", "Spring")));
    }

    #[test]
    fn test_version_record_without_number() {
        let doc = CmsDocument::new("version", "x.json", Map::new());

        assert_eq!(VersionRecord::from_document(&doc), None);
    }

    #[test]
    fn test_version_record_values_round_trip_names() {
        let record = VersionRecord::new("2.0", "Two");

        assert_eq!(
            Value::Object(record.to_values()),
            json!({"versionNumber": "2.0", "versionLabel": "Two"})
        );
        assert_eq!(record.relative_path(), "2.0.json");
    }
}
