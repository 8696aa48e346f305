//! Version creation implementation.

use std::cmp::Ordering;

use serde_json::Map;
use tracing::{info, warn};

use crate::backend::ContentBackend;
use crate::types::{CmsDocument, VersionRecord};

use super::VersionConfig;
use super::error::VersionError;
use super::result::{CopiedDocument, DryRunResult, FailedDocument, VersionResult};
use super::rewrite::{ReferenceRewriter, VERSIONS_DIR, is_versioned};

/// Check that a version number is usable as a single path segment.
///
/// Allowed characters are ASCII letters, digits, `.`, `_` and `-`;
/// `.` and `..` are rejected.
pub fn validate_version_number(version: &str) -> Result<(), VersionError> {
    let invalid = |reason| {
        Err(VersionError::InvalidVersion {
            version: version.to_owned(),
            reason,
        })
    };

    if version.is_empty() {
        return invalid("must not be empty");
    }
    if version == "." || version == ".." {
        return invalid("must not be a relative path component");
    }
    if !version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return invalid("only letters, digits, '.', '_' and '-' are allowed");
    }
    Ok(())
}

/// Documents to copy, checked against existing versions.
struct Plan {
    documents: Vec<CmsDocument>,
}

/// Creates content versions.
///
/// Copies are issued sequentially and are not transactional: a document
/// that fails to copy is logged, recorded in [`VersionResult::failed`] and
/// skipped. The version record is created last; if that fails the copied
/// documents remain in place.
pub struct VersionCreator<'a> {
    backend: &'a dyn ContentBackend,
    config: VersionConfig,
}

impl<'a> VersionCreator<'a> {
    /// Create a new version creator.
    #[must_use]
    pub fn new(backend: &'a dyn ContentBackend, config: VersionConfig) -> Self {
        Self { backend, config }
    }

    /// Snapshot all documentation into `record.version_number`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the version number is invalid
    /// - the version already exists (no mutation is issued)
    /// - listing documents fails
    /// - creating the version record fails
    pub fn create(&self, record: &VersionRecord) -> Result<VersionResult, VersionError> {
        let plan = self.plan(record)?;
        let version = &record.version_number;
        let rewriter =
            ReferenceRewriter::new(&self.config.content_root, &self.config.route_prefix, version);

        info!(version, documents = plan.documents.len(), "Creating version");

        let mut copied = Vec::new();
        let mut failed = Vec::new();
        for doc in &plan.documents {
            let target_path = versioned_path(version, &doc.relative_path);
            match self.copy_document(doc, &target_path, &rewriter) {
                Ok(()) => copied.push(CopiedDocument {
                    collection: doc.collection.clone(),
                    source_path: doc.relative_path.clone(),
                    target_path,
                }),
                Err(e) => {
                    warn!(
                        collection = %doc.collection,
                        path = %doc.relative_path,
                        error = %e,
                        "Failed to copy document into version"
                    );
                    failed.push(FailedDocument {
                        collection: doc.collection.clone(),
                        source_path: doc.relative_path.clone(),
                        target_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        self.backend.create_document(
            &self.config.versions_collection,
            &record.relative_path(),
            &record.to_values(),
        )?;

        info!(
            version,
            copied = copied.len(),
            failed = failed.len(),
            "Version created"
        );

        Ok(VersionResult {
            version: record.clone(),
            copied,
            failed,
        })
    }

    /// Report what [`create`](Self::create) would copy, without mutating.
    ///
    /// # Errors
    ///
    /// Returns the same validation and listing errors as `create`.
    pub fn dry_run(&self, record: &VersionRecord) -> Result<DryRunResult, VersionError> {
        let plan = self.plan(record)?;
        let documents = plan
            .documents
            .iter()
            .map(|doc| CopiedDocument {
                collection: doc.collection.clone(),
                source_path: doc.relative_path.clone(),
                target_path: versioned_path(&record.version_number, &doc.relative_path),
            })
            .collect();

        Ok(DryRunResult {
            version: record.clone(),
            documents,
        })
    }

    /// Existing version records, sorted by version number.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the versions collection fails.
    pub fn list_versions(&self) -> Result<Vec<VersionRecord>, VersionError> {
        let mut records: Vec<_> = self
            .backend
            .list_all(&self.config.versions_collection, self.config.page_size)?
            .iter()
            .filter_map(VersionRecord::from_document)
            .collect();
        records.sort_by(|a, b| compare_versions(&a.version_number, &b.version_number));
        Ok(records)
    }

    fn plan(&self, record: &VersionRecord) -> Result<Plan, VersionError> {
        let version = record.version_number.as_str();
        validate_version_number(version)?;

        let exists = || VersionError::AlreadyExists {
            version: version.to_owned(),
        };

        if self.list_versions()?.iter().any(|r| r.version_number == version) {
            return Err(exists());
        }

        let mut documents = self
            .backend
            .list_all(&self.config.docs_collection, self.config.page_size)?;
        documents.extend(
            self.backend
                .list_all(&self.config.toc_collection, self.config.page_size)?,
        );

        let prefix = format!("{VERSIONS_DIR}/{version}/");
        if documents.iter().any(|d| d.relative_path.starts_with(&prefix)) {
            return Err(exists());
        }

        documents.retain(|d| !is_versioned(&d.relative_path));
        Ok(Plan { documents })
    }

    fn copy_document(
        &self,
        doc: &CmsDocument,
        target_path: &str,
        rewriter: &ReferenceRewriter,
    ) -> Result<(), crate::error::CmsError> {
        self.backend
            .create_document(&doc.collection, target_path, &Map::new())?;

        let mut values = doc.values.clone();
        rewriter.rewrite_values(&mut values);
        self.backend
            .update_document(&doc.collection, target_path, &values)
    }
}

fn versioned_path(version: &str, relative_path: &str) -> String {
    format!("{VERSIONS_DIR}/{version}/{relative_path}")
}

/// Compare dotted version numbers segment by segment, numerically where
/// both segments are numbers.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split(['.', '-', '_']);
    let mut right = b.split(['.', '-', '_']);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
