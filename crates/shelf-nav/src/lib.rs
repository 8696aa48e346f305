//! Navigation tree walking for Shelf.
//!
//! The CMS stores the sidebar as a tree of [`NavigationNode`]s whose leaves
//! reference documents by slug. [`NavIndex`] flattens that tree once and
//! answers the per-request questions: which leaf is selected for a URL path,
//! which groups contain it, the breadcrumb trail and the previous/next pages.
//!
//! # Example
//!
//! ```
//! use shelf_nav::{ExpandState, NavIndex, NavTree, NavigationNode, SlugResolver};
//!
//! let tree = NavTree::new(vec![NavigationNode::group(
//!     "Guides",
//!     vec![NavigationNode::page("Install", "content/docs/install.mdx")],
//! )]);
//! let index = NavIndex::new(&tree, &SlugResolver::default());
//!
//! let crumbs = index.breadcrumbs("/docs/install");
//! assert_eq!(crumbs.len(), 2);
//! let items = index.active("/docs/install", &ExpandState::new());
//! assert!(items[0].expanded);
//! ```

mod index;
mod node;
mod slug;
mod state;

pub use index::{Breadcrumb, NavIndex, NavLink, Neighbors};
pub use node::{LinkTarget, NavError, NavTree, NavigationNode};
pub use slug::{SlugResolver, normalize_path};
pub use state::{ExpandState, NavItemState, NodeId};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(NavIndex: Send, Sync);
    static_assertions::assert_impl_all!(NavTree: Send, Sync, Clone);
}
