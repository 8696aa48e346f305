//! Content versioning workflow.
//!
//! This module provides the [`VersionCreator`] struct that snapshots the
//! documentation into a numbered version:
//!
//! 1. Validate the version number
//! 2. Fetch existing version records and all docs/TOC documents
//! 3. Reject the request if the version already exists (before any mutation)
//! 4. Copy every document to `_versions/<number>/<path>`, rewriting internal
//!    references to point into the snapshot
//! 5. Create the version record
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use shelf_cms::{CmsClient, VersionConfig, VersionCreator, VersionRecord};
//!
//! let client = CmsClient::new("http://localhost:4001/graphql", "token");
//! let creator = VersionCreator::new(&client, VersionConfig::default());
//!
//! let record = VersionRecord::new("1.0", "First release");
//! let preview = creator.dry_run(&record)?;
//! let result = creator.create(&record)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;
mod rewrite;

pub use error::VersionError;
pub use executor::{VersionCreator, validate_version_number};
pub use result::{CopiedDocument, DryRunResult, FailedDocument, VersionResult};
pub use rewrite::{ReferenceRewriter, VERSIONS_DIR, is_versioned};

use shelf_config::Config;

/// Collections and paths the versioning workflow operates on.
#[derive(Clone, Debug)]
pub struct VersionConfig {
    /// Content documents collection.
    pub docs_collection: String,
    /// Table-of-contents collection.
    pub toc_collection: String,
    /// Version records collection.
    pub versions_collection: String,
    /// Repository path of the docs collection (for document references).
    pub content_root: String,
    /// URL prefix of the docs routes.
    pub route_prefix: String,
    /// Listing page size.
    pub page_size: u32,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            docs_collection: "docs".to_owned(),
            toc_collection: "docsTableOfContents".to_owned(),
            versions_collection: "version".to_owned(),
            content_root: "content/docs".to_owned(),
            route_prefix: "/docs".to_owned(),
            page_size: 50,
        }
    }
}

impl VersionConfig {
    /// Build from the site configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            docs_collection: config.cms.collections.docs.clone(),
            toc_collection: config.cms.collections.toc.clone(),
            versions_collection: config.cms.collections.versions.clone(),
            content_root: config.site_resolved.content_root.clone(),
            route_prefix: config.site_resolved.route_prefix.clone(),
            page_size: config.cms.page_size,
        }
    }
}
