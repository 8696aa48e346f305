//! Headless CMS access for Shelf.
//!
//! - [`CmsClient`]: sync GraphQL client for the CMS content API
//! - [`ContentBackend`]: the document operations the site and the
//!   versioning workflow need, implemented by the client and by `MockCms`
//! - [`VersionCreator`]: snapshots all docs and TOC documents into
//!   `_versions/<number>/` and records the version

mod backend;
mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod types;
pub mod versioning;

pub use backend::ContentBackend;
pub use client::CmsClient;
pub use error::CmsError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCms, Mutation};
pub use types::{CmsDocument, DocumentPage, VersionRecord};
pub use versioning::{
    DryRunResult, VERSIONS_DIR, VersionConfig, VersionCreator, VersionError, VersionResult,
    is_versioned,
};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(CmsClient: Send, Sync);
    static_assertions::assert_impl_all!(MockCms: Send, Sync);
    static_assertions::assert_obj_safe!(ContentBackend);
}
