//! Result types for the versioning workflow.

use serde::Serialize;

use crate::types::VersionRecord;

/// Document copied into a version snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopiedDocument {
    pub collection: String,
    pub source_path: String,
    pub target_path: String,
}

/// Document that could not be copied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedDocument {
    pub collection: String,
    pub source_path: String,
    pub target_path: String,
    pub error: String,
}

/// Result of creating a version.
///
/// Copies are not transactional: `failed` lists documents that were skipped
/// while the rest of the snapshot was still written.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResult {
    pub version: VersionRecord,
    pub copied: Vec<CopiedDocument>,
    pub failed: Vec<FailedDocument>,
}

impl VersionResult {
    /// True when every document was copied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of a dry-run version creation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunResult {
    pub version: VersionRecord,
    /// Documents that would be copied, in copy order.
    pub documents: Vec<CopiedDocument>,
}
