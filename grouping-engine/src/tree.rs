//! FILENAME: grouping-engine/src/tree.rs
//! Tree Builder - partitions flat records into a Leaf/Group hierarchy.
//!
//! The tree is a pure derivation of (records, group keys): it carries no
//! expansion or selection state, and it is rebuilt wholesale on every
//! upstream change. Nodes reference records by index into the caller's
//! record slice rather than cloning row data.
//!
//! Node ids are deterministic strings built from the ancestor path, so
//! expansion and selection sets stay meaningful across rebuilds:
//! - Group: `{parent_path}/{group_value}` (e.g. "root/Germany/Lila")
//! - Leaf:  `{parent_path}|{record_id}`  (e.g. "root/Germany|row-3")

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use table_model::{ColumnId, Record};

use crate::definition::NodeId;

/// Path prefix for all node ids.
pub const ROOT_PATH: &str = "root";

// ============================================================================
// TREE NODES
// ============================================================================

/// A leaf wrapping exactly one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafNode {
    /// Stable id: ancestor path + "|" + record id.
    pub id: NodeId,

    /// Nesting depth. Always equals the number of active group keys.
    pub depth: usize,

    /// Index of the wrapped record in the input slice.
    pub row: usize,
}

/// A partition of records sharing one value for the grouping column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupNode {
    /// Stable id: path of group values from the root.
    pub id: NodeId,

    /// The column this level groups by.
    pub group_key: ColumnId,

    /// The shared value of this partition, in string form.
    pub group_value: String,

    /// Number of leaf descendants (transitively).
    pub item_count: usize,

    /// Nesting depth. Equals this key's position in the key list.
    pub depth: usize,

    /// Child nodes: either all Groups or all Leaves, never mixed.
    pub children: Vec<TreeNode>,
}

/// A node in the grouping tree. Synthetic totals are NOT tree nodes;
/// they exist only in the flattened view (see `flatten`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf(LeafNode),
    Group(GroupNode),
}

impl TreeNode {
    pub fn id(&self) -> &str {
        match self {
            TreeNode::Leaf(leaf) => &leaf.id,
            TreeNode::Group(group) => &group.id,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(leaf) => leaf.depth,
            TreeNode::Group(group) => group.depth,
        }
    }
}

// ============================================================================
// TREE CONSTRUCTION
// ============================================================================

/// Builds the grouping tree for `records` under the ordered `group_keys`.
///
/// With an empty key list the result is one leaf per record in input
/// order. Otherwise records are partitioned by the string form of the
/// first key's value, partitions are ordered ascending by that string,
/// and each partition recurses with the remaining keys. Every record
/// lands in exactly one partition (missing values group under "").
pub fn build_tree(records: &[Record], group_keys: &[ColumnId]) -> Vec<TreeNode> {
    debug_assert!(
        {
            let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
            ids.sort_unstable();
            let before = ids.len();
            ids.dedup();
            ids.len() == before
        },
        "duplicate record ids in input set"
    );

    let rows: Vec<usize> = (0..records.len()).collect();
    build_level(records, &rows, group_keys, 0, ROOT_PATH)
}

fn build_level(
    records: &[Record],
    rows: &[usize],
    keys: &[ColumnId],
    depth: usize,
    path: &str,
) -> Vec<TreeNode> {
    if rows.is_empty() {
        return Vec::new();
    }

    let Some((key, remaining)) = keys.split_first() else {
        return rows
            .iter()
            .map(|&row| {
                TreeNode::Leaf(LeafNode {
                    id: format!("{}|{}", path, records[row].id),
                    depth,
                    row,
                })
            })
            .collect();
    };

    // Partition by the string form of the key's value. Each partition
    // preserves the input order of its rows.
    let mut partitions: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for &row in rows {
        let value = records[row].group_label(key);
        partitions.entry(value).or_default().push(row);
    }

    let mut values: Vec<String> = partitions.keys().cloned().collect();
    values.sort();

    values
        .into_iter()
        .map(|value| {
            let member_rows = &partitions[&value];
            let child_path = format!("{}/{}", path, value);
            let children = build_level(records, member_rows, remaining, depth + 1, &child_path);
            TreeNode::Group(GroupNode {
                id: child_path,
                group_key: key.clone(),
                group_value: value,
                item_count: member_rows.len(),
                depth,
                children,
            })
        })
        .collect()
}

// ============================================================================
// TREE QUERIES
// ============================================================================

/// Appends the record indices of every leaf under `node`, in tree order.
pub fn collect_leaf_rows(node: &TreeNode, out: &mut Vec<usize>) {
    match node {
        TreeNode::Leaf(leaf) => out.push(leaf.row),
        TreeNode::Group(group) => {
            for child in &group.children {
                collect_leaf_rows(child, out);
            }
        }
    }
}

/// The record indices of every leaf in the whole forest, in tree order.
pub fn all_leaf_rows(tree: &[TreeNode]) -> Vec<usize> {
    let mut rows = Vec::new();
    for node in tree {
        collect_leaf_rows(node, &mut rows);
    }
    rows
}

/// Finds a node anywhere in the forest by its stable id.
pub fn find_node<'a>(tree: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in tree {
        if node.id() == id {
            return Some(node);
        }
        if let TreeNode::Group(group) = node {
            if let Some(found) = find_node(&group.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Appends the id of every group in the forest ("Expand All").
pub fn collect_group_ids(tree: &[TreeNode], out: &mut Vec<NodeId>) {
    for node in tree {
        if let TreeNode::Group(group) = node {
            out.push(group.id.clone());
            collect_group_ids(&group.children, out);
        }
    }
}
