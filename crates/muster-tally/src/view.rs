//! Read-only aggregate tree for presentation.
//!
//! Every node's count is the subtree sum of its path. Which nodes are
//! expanded is decided by the caller; expansion only controls how much of
//! the tree is materialized and never affects a count.

use serde::Serialize;
use ts_rs::TS;

use muster_types::NodePath;

use crate::Tally;

/// Label shown for the root node.
pub const ROOT_LABEL: &str = "Total";

/// One node of the aggregate tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TallyNode {
    /// Address of the node.
    pub path: NodePath,
    /// Display label of the deepest path component.
    pub label: String,
    /// Subtree sum.
    pub count: u64,
    /// Whether the node has children in the taxonomy.
    pub expandable: bool,
    /// Materialized children; empty when the node is collapsed.
    pub children: Vec<TallyNode>,
}

impl TallyNode {
    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        self.children
            .iter()
            .fold(1_usize, |acc, child| acc.saturating_add(child.node_count()))
    }
}

/// Build the aggregate tree rooted at `path`.
///
/// Children of a node are materialized only when `is_open` returns `true`
/// for that node's path.
pub fn build_tree(tally: &Tally, path: NodePath, is_open: &dyn Fn(NodePath) -> bool) -> TallyNode {
    let taxonomy = tally.taxonomy();
    let child_paths = taxonomy.children(path);
    let expandable = !child_paths.is_empty();
    let children = if expandable && is_open(path) {
        child_paths
            .into_iter()
            .map(|child| build_tree(tally, child, is_open))
            .collect()
    } else {
        Vec::new()
    };
    TallyNode {
        path,
        label: taxonomy
            .node_label(path)
            .unwrap_or(ROOT_LABEL)
            .to_owned(),
        count: tally.sum(path),
        expandable,
        children,
    }
}

/// Build the fully expanded tree from the root.
pub fn full_tree(tally: &Tally) -> TallyNode {
    build_tree(tally, NodePath::Root, &|_| true)
}
