//! Assembled page model.

use serde::Serialize;
use shelf_content::TocEntry;
use shelf_nav::{Breadcrumb, NavItemState, Neighbors};

/// Page metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Normalized URL path.
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Version number when the page belongs to a snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Document path relative to the docs collection.
    pub source_path: String,
}

/// Everything a client needs to display a documentation page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub meta: PageMeta,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub toc: Vec<TocEntry>,
    pub navigation: Vec<NavItemState>,
    pub neighbors: Neighbors,
    pub html: String,
    /// Rendering and navigation problems that did not prevent the page.
    pub warnings: Vec<String>,
}
