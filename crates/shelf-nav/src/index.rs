//! Flattened navigation index with path lookups.
//!
//! Nodes are stored in pre-order in a flat `Vec` with parent/children
//! relationships tracked by indices. This provides:
//! - O(1) URL path lookups via the `path_index` `HashMap`
//! - O(d) breadcrumb building where d is the node depth
//! - O(1) previous/next lookups over the leaf sequence

use std::collections::HashMap;

use serde::Serialize;

use crate::node::{LinkTarget, NavTree, NavigationNode};
use crate::slug::{SlugResolver, normalize_path};
use crate::state::{ExpandState, NavItemState, NodeId};

/// Breadcrumb trail item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub title: String,
    /// URL path (`None` for groups, which have no page).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Link to a sibling page in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

/// Previous and next pages around the current one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

#[derive(Debug)]
struct Entry {
    id: NodeId,
    title: String,
    status: Option<String>,
    /// Resolved URL path for slug leaves.
    path: Option<String>,
    href: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Navigation tree indexed for the walker operations.
///
/// When several leaves resolve to the same path the first one in document
/// order wins: it alone is selected and used for breadcrumbs.
#[derive(Debug, Default)]
pub struct NavIndex {
    entries: Vec<Entry>,
    roots: Vec<usize>,
    path_index: HashMap<String, usize>,
    /// Slug leaves in document order (first occurrence of each path).
    pages: Vec<usize>,
    page_positions: HashMap<usize, usize>,
}

impl NavIndex {
    /// Index a tree, resolving leaf slugs with `resolver`.
    #[must_use]
    pub fn new(tree: &NavTree, resolver: &SlugResolver) -> Self {
        let mut index = Self::default();
        for (i, node) in tree.items().iter().enumerate() {
            let idx = index.insert(node, NodeId::new(vec![i]), None, resolver);
            index.roots.push(idx);
        }
        index
    }

    fn insert(
        &mut self,
        node: &NavigationNode,
        id: NodeId,
        parent: Option<usize>,
        resolver: &SlugResolver,
    ) -> usize {
        let idx = self.entries.len();
        let (path, href) = match node {
            NavigationNode::Leaf {
                target: LinkTarget::Slug(slug),
                ..
            } => (Some(resolver.resolve(slug)), None),
            NavigationNode::Leaf {
                target: LinkTarget::Href(href),
                ..
            } => (None, Some(href.clone())),
            NavigationNode::Group { .. } => (None, None),
        };

        if let Some(path) = &path {
            if self.path_index.contains_key(path) {
                tracing::debug!(%path, title = node.title(), "Duplicate navigation entry ignored");
            } else {
                self.path_index.insert(path.clone(), idx);
                self.page_positions.insert(idx, self.pages.len());
                self.pages.push(idx);
            }
        }

        self.entries.push(Entry {
            id: id.clone(),
            title: node.title().to_owned(),
            status: node.status().map(str::to_owned),
            path,
            href,
            parent,
            children: Vec::new(),
        });

        for (i, child) in node.items().iter().enumerate() {
            let child_idx = self.insert(child, id.child(i), Some(idx), resolver);
            self.entries[idx].children.push(child_idx);
        }
        idx
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a leaf resolves to `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Title of the leaf selected by `path`.
    #[must_use]
    pub fn title(&self, path: &str) -> Option<&str> {
        self.lookup(path).map(|i| self.entries[i].title.as_str())
    }

    /// Resolved paths of all pages in document order.
    pub fn page_paths(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .filter_map(|&i| self.entries[i].path.as_deref())
    }

    fn lookup(&self, path: &str) -> Option<usize> {
        self.path_index.get(&normalize_path(path)).copied()
    }

    /// Breadcrumb trail from the root to the selected leaf (inclusive).
    ///
    /// Unknown paths produce an empty trail.
    #[must_use]
    pub fn breadcrumbs(&self, path: &str) -> Vec<Breadcrumb> {
        let Some(idx) = self.lookup(path) else {
            return Vec::new();
        };

        let mut crumbs = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            let entry = &self.entries[i];
            crumbs.push(Breadcrumb {
                title: entry.title.clone(),
                path: entry.path.clone(),
            });
            current = entry.parent;
        }
        crumbs.reverse();
        crumbs
    }

    /// Annotate the tree for `path`.
    ///
    /// At most one leaf is `selected`; all its ancestors are `child_selected`.
    #[must_use]
    pub fn active(&self, path: &str, expand: &ExpandState) -> Vec<NavItemState> {
        let mut on_path = vec![false; self.entries.len()];
        let selected = self.lookup(path);
        if let Some(idx) = selected {
            let mut current = self.entries[idx].parent;
            while let Some(i) = current {
                on_path[i] = true;
                current = self.entries[i].parent;
            }
        }

        self.roots
            .iter()
            .map(|&i| self.build_state(i, selected, &on_path, expand))
            .collect()
    }

    fn build_state(
        &self,
        idx: usize,
        selected: Option<usize>,
        on_path: &[bool],
        expand: &ExpandState,
    ) -> NavItemState {
        let entry = &self.entries[idx];
        let child_selected = on_path[idx];
        let items: Vec<_> = entry
            .children
            .iter()
            .map(|&c| self.build_state(c, selected, on_path, expand))
            .collect();
        let is_group = entry.path.is_none() && entry.href.is_none();

        NavItemState {
            id: entry.id.clone(),
            title: entry.title.clone(),
            path: entry.path.clone(),
            href: entry.href.clone(),
            status: entry.status.clone(),
            selected: selected == Some(idx),
            child_selected,
            expanded: is_group && expand.is_expanded(&entry.id, child_selected),
            items,
        }
    }

    /// Previous and next pages in document order.
    ///
    /// External links and groups are skipped.
    #[must_use]
    pub fn neighbors(&self, path: &str) -> Neighbors {
        let Some(pos) = self
            .lookup(path)
            .and_then(|idx| self.page_positions.get(&idx).copied())
        else {
            return Neighbors::default();
        };

        let link = |i: usize| {
            let entry = &self.entries[i];
            entry.path.as_ref().map(|path| NavLink {
                title: entry.title.clone(),
                path: path.clone(),
            })
        };

        Neighbors {
            prev: pos
                .checked_sub(1)
                .and_then(|p| self.pages.get(p))
                .and_then(|&i| link(i)),
            next: self.pages.get(pos + 1).and_then(|&i| link(i)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_tree() -> NavTree {
        NavTree::new(vec![
            NavigationNode::page("Introduction", "content/docs/index.mdx"),
            NavigationNode::group(
                "Guides",
                vec![
                    NavigationNode::group(
                        "Setup",
                        vec![
                            NavigationNode::page("Install", "content/docs/guides/install.mdx"),
                            NavigationNode::page("Configure", "content/docs/guides/configure.mdx"),
                        ],
                    ),
                    NavigationNode::link("GitHub", "https://github.com/example"),
                ],
            ),
            NavigationNode::page("FAQ", "faq"),
        ])
    }

    fn index() -> NavIndex {
        NavIndex::new(&sample_tree(), &SlugResolver::default())
    }

    fn crumb(title: &str, path: Option<&str>) -> Breadcrumb {
        Breadcrumb {
            title: title.to_owned(),
            path: path.map(str::to_owned),
        }
    }

    #[test]
    fn test_breadcrumbs_two_levels_deep() {
        let crumbs = index().breadcrumbs("/docs/guides/install");

        assert_eq!(
            crumbs,
            vec![
                crumb("Guides", None),
                crumb("Setup", None),
                crumb("Install", Some("/docs/guides/install")),
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_top_level_and_unknown() {
        let index = index();

        assert_eq!(index.breadcrumbs("/docs/"), vec![crumb("Introduction", Some("/docs"))]);
        assert!(index.breadcrumbs("/docs/missing").is_empty());
    }

    #[test]
    fn test_active_marks_selection_and_ancestors() {
        let items = index().active("/docs/guides/configure", &ExpandState::new());

        assert!(!items[0].selected);
        let guides = &items[1];
        assert!(guides.child_selected && guides.expanded && !guides.selected);
        let setup = &guides.items[0];
        assert!(setup.child_selected && setup.expanded);
        assert!(!setup.items[0].selected);
        assert!(setup.items[1].selected);
        assert!(!setup.items[1].child_selected);
        assert!(!items[2].child_selected && !items[2].expanded);
    }

    #[test]
    fn test_active_respects_explicit_collapse() {
        let mut expand = ExpandState::new();
        expand.set(NodeId::new(vec![1]), false);
        expand.set(NodeId::new(vec![1, 0]), false);

        let items = index().active("/docs/guides/install", &expand);

        assert!(items[1].child_selected);
        assert!(!items[1].expanded);
        assert!(!items[1].items[0].expanded);
    }

    #[test]
    fn test_first_matching_leaf_wins() {
        let tree = NavTree::new(vec![
            NavigationNode::group("A", vec![NavigationNode::page("First", "shared")]),
            NavigationNode::group("B", vec![NavigationNode::page("Second", "shared")]),
        ]);
        let index = NavIndex::new(&tree, &SlugResolver::default());

        let items = index.active("/docs/shared", &ExpandState::new());

        assert!(items[0].items[0].selected);
        assert!(items[0].child_selected);
        assert!(!items[1].items[0].selected);
        assert!(!items[1].child_selected);
        assert_eq!(index.title("/docs/shared"), Some("First"));
    }

    #[test]
    fn test_href_leaf_is_never_selected() {
        let items = index().active("https://github.com/example", &ExpandState::new());

        assert!(!items[1].items[1].selected);
        assert_eq!(items[1].items[1].href.as_deref(), Some("https://github.com/example"));
    }

    #[test]
    fn test_neighbors_skip_links_and_groups() {
        let index = index();

        let middle = index.neighbors("/docs/guides/configure");
        assert_eq!(middle.prev.unwrap().path, "/docs/guides/install");
        assert_eq!(middle.next.unwrap().path, "/docs/faq");

        let first = index.neighbors("/docs");
        assert!(first.prev.is_none());
        assert_eq!(first.next.unwrap().title, "Install");

        assert_eq!(index.neighbors("/nope"), Neighbors::default());
    }

    #[test]
    fn test_page_paths_in_document_order() {
        let paths: Vec<_> = index().page_paths().map(str::to_owned).collect();

        assert_eq!(
            paths,
            ["/docs", "/docs/guides/install", "/docs/guides/configure", "/docs/faq"]
        );
    }

    #[test]
    fn test_node_ids_follow_index_chain() {
        let items = index().active("", &ExpandState::new());

        assert_eq!(items[1].items[0].items[1].id.to_string(), "1.0.1");
    }
}
