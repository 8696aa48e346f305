//! Per-request navigation state: selection and expand/collapse toggles.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Position of a node in the tree as a chain of child indices.
///
/// Displayed as dot-separated indices (`0.2.1`), which is also its wire form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    #[must_use]
    pub fn new(chain: Vec<usize>) -> Self {
        Self(chain)
    }

    /// Id of the `index`-th child.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut chain = Vec::with_capacity(self.0.len() + 1);
        chain.extend_from_slice(&self.0);
        chain.push(index);
        Self(chain)
    }

    /// Nesting depth (0 for top-level nodes).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.').map(str::parse).collect::<Result<_, _>>().map(Self)
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Explicit expand/collapse toggles made by the reader.
///
/// Groups without a toggle follow the selection: they are expanded when a
/// descendant is selected.
#[derive(Clone, Debug, Default)]
pub struct ExpandState {
    toggles: HashMap<NodeId, bool>,
}

impl ExpandState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from lists of explicitly expanded and collapsed ids.
    ///
    /// An id present in both lists counts as collapsed.
    #[must_use]
    pub fn from_toggles(
        expanded: impl IntoIterator<Item = NodeId>,
        collapsed: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        let mut state = Self::new();
        for id in expanded {
            state.set(id, true);
        }
        for id in collapsed {
            state.set(id, false);
        }
        state
    }

    /// Record an explicit toggle.
    pub fn set(&mut self, id: NodeId, expanded: bool) {
        self.toggles.insert(id, expanded);
    }

    /// Flip a group from its currently displayed state.
    pub fn toggle(&mut self, id: NodeId, currently_expanded: bool) {
        self.toggles.insert(id, !currently_expanded);
    }

    /// Forget an explicit toggle.
    pub fn clear(&mut self, id: &NodeId) {
        self.toggles.remove(id);
    }

    /// Whether a group is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &NodeId, child_selected: bool) -> bool {
        self.toggles.get(id).copied().unwrap_or(child_selected)
    }
}

/// Navigation node annotated for the current path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItemState {
    pub id: NodeId,
    pub title: String,
    /// Resolved URL path of an internal leaf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// External URL of a link leaf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub selected: bool,
    pub child_selected: bool,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItemState>,
}
