//! FILENAME: grouping-engine/src/selection.rs
//! Selection Model - tri-state selection derived from the leaf-id set.
//!
//! Only leaves are ever stored as selected; group and total states are
//! computed on demand from the selected-leaf set, never cached. Totals
//! are never selectable. Toggling a node affects its entire leaf subtree
//! atomically: a partially-selected group selects everything first
//! (select-all-on-partial), a fully-selected one deselects everything.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::definition::NodeId;
use crate::flatten::DisplayNode;
use crate::tree::TreeNode;

/// Aggregate selection condition of a display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStatus {
    Unchecked,
    Checked,
    Indeterminate,
    /// Totals only: the row has no checkbox.
    Disabled,
}

// ============================================================================
// LEAF ENUMERATION
// ============================================================================

/// The ids of every leaf under `node`, in tree order. A leaf yields
/// itself.
pub fn leaf_ids_under(node: &TreeNode) -> Vec<NodeId> {
    let mut ids = Vec::new();
    collect_leaf_ids(node, &mut ids);
    ids
}

fn collect_leaf_ids(node: &TreeNode, out: &mut Vec<NodeId>) {
    match node {
        TreeNode::Leaf(leaf) => out.push(leaf.id.clone()),
        TreeNode::Group(group) => {
            for child in &group.children {
                collect_leaf_ids(child, out);
            }
        }
    }
}

// ============================================================================
// STATUS DERIVATION
// ============================================================================

/// Derives the tri-state status of a tree node from the selected set.
pub fn status_of(node: &TreeNode, selected: &FxHashSet<NodeId>) -> SelectionStatus {
    match node {
        TreeNode::Leaf(leaf) => {
            if selected.contains(&leaf.id) {
                SelectionStatus::Checked
            } else {
                SelectionStatus::Unchecked
            }
        }
        TreeNode::Group(_) => {
            let ids = leaf_ids_under(node);
            if ids.is_empty() {
                return SelectionStatus::Unchecked;
            }
            let count = ids.iter().filter(|id| selected.contains(*id)).count();
            if count == 0 {
                SelectionStatus::Unchecked
            } else if count == ids.len() {
                SelectionStatus::Checked
            } else {
                SelectionStatus::Indeterminate
            }
        }
    }
}

/// Derives the status of a display row. Totals are always disabled; leaf
/// and group rows resolve against their tree counterpart by id.
pub fn display_status_of(
    node: &DisplayNode,
    tree: &[TreeNode],
    selected: &FxHashSet<NodeId>,
) -> SelectionStatus {
    match node {
        DisplayNode::Total { .. } => SelectionStatus::Disabled,
        DisplayNode::Leaf { id, .. } => {
            if selected.contains(id) {
                SelectionStatus::Checked
            } else {
                SelectionStatus::Unchecked
            }
        }
        DisplayNode::Group { id, .. } => crate::tree::find_node(tree, id)
            .map(|n| status_of(n, selected))
            .unwrap_or(SelectionStatus::Unchecked),
    }
}

// ============================================================================
// TOGGLING
// ============================================================================

/// Returns a new selected set with `node`'s leaf subtree toggled
/// atomically. If every leaf is selected they are all removed; otherwise
/// they are all added.
pub fn toggle(node: &TreeNode, selected: &FxHashSet<NodeId>) -> FxHashSet<NodeId> {
    let ids = leaf_ids_under(node);
    let mut next = selected.clone();

    let all_selected = !ids.is_empty() && ids.iter().all(|id| selected.contains(id));
    if all_selected {
        for id in &ids {
            next.remove(id);
        }
    } else {
        for id in ids {
            next.insert(id);
        }
    }
    next
}
