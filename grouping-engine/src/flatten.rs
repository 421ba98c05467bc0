//! FILENAME: grouping-engine/src/flatten.rs
//! Flattener - turns the grouping tree into an ordered display sequence.
//!
//! The output is a pre-order linearization: a group always immediately
//! precedes its (if expanded) descendant block, followed by one synthetic
//! subtotal row. Collapsed groups hide both their children and their
//! subtotal. The walk ends with a single grand-total row covering every
//! leaf in the tree, emitted regardless of expansion state but omitted
//! when the tree itself is empty.
//!
//! Total rows exist only here; the tree never contains them and they are
//! recomputed on every flatten, never mutated.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use table_model::{Column, ColumnId, Record};

use crate::aggregate::aggregate;
use crate::definition::NodeId;
use crate::tree::{collect_leaf_rows, all_leaf_rows, TreeNode};

/// Reserved id of the grand-total row.
pub const GRAND_TOTAL_ID: &str = "grand-total";

// ============================================================================
// DISPLAY NODES
// ============================================================================

/// One row of the flattened, renderable sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DisplayNode {
    /// A record row.
    Leaf {
        id: NodeId,
        depth: usize,
        /// Index of the record in the caller's record slice.
        row: usize,
    },
    /// A group header row.
    Group {
        id: NodeId,
        depth: usize,
        group_key: ColumnId,
        group_value: String,
        item_count: usize,
        /// Whether the group's children follow in the sequence.
        expanded: bool,
    },
    /// A synthetic subtotal or grand-total row.
    Total {
        id: NodeId,
        depth: usize,
        label: String,
        /// Rolled-up value per aggregable column id.
        stats: FxHashMap<ColumnId, f64>,
    },
}

impl DisplayNode {
    pub fn id(&self) -> &str {
        match self {
            DisplayNode::Leaf { id, .. }
            | DisplayNode::Group { id, .. }
            | DisplayNode::Total { id, .. } => id,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            DisplayNode::Leaf { depth, .. }
            | DisplayNode::Group { depth, .. }
            | DisplayNode::Total { depth, .. } => *depth,
        }
    }

    pub fn is_total(&self) -> bool {
        matches!(self, DisplayNode::Total { .. })
    }
}

// ============================================================================
// FLATTENING
// ============================================================================

/// Flattens `tree` into the ordered display sequence, honoring `expanded`.
pub fn flatten(
    tree: &[TreeNode],
    expanded: &FxHashSet<NodeId>,
    records: &[Record],
    columns: &[Column],
) -> Vec<DisplayNode> {
    let mut out = Vec::new();
    flatten_nodes(tree, expanded, records, columns, &mut out);

    if !tree.is_empty() {
        let rows = all_leaf_rows(tree);
        out.push(DisplayNode::Total {
            id: GRAND_TOTAL_ID.to_string(),
            depth: 0,
            label: "Total".to_string(),
            stats: aggregate(records, &rows, columns),
        });
    }

    out
}

fn flatten_nodes(
    nodes: &[TreeNode],
    expanded: &FxHashSet<NodeId>,
    records: &[Record],
    columns: &[Column],
    out: &mut Vec<DisplayNode>,
) {
    for node in nodes {
        match node {
            TreeNode::Leaf(leaf) => out.push(DisplayNode::Leaf {
                id: leaf.id.clone(),
                depth: leaf.depth,
                row: leaf.row,
            }),
            TreeNode::Group(group) => {
                let is_expanded = expanded.contains(&group.id);
                out.push(DisplayNode::Group {
                    id: group.id.clone(),
                    depth: group.depth,
                    group_key: group.group_key.clone(),
                    group_value: group.group_value.clone(),
                    item_count: group.item_count,
                    expanded: is_expanded,
                });

                if is_expanded {
                    flatten_nodes(&group.children, expanded, records, columns, out);

                    // Subtotal over ALL transitive leaves: a collapsed inner
                    // group still contributes to its ancestor's numbers.
                    let mut rows = Vec::new();
                    collect_leaf_rows(node, &mut rows);
                    out.push(DisplayNode::Total {
                        id: format!("total-{}", group.id),
                        depth: group.depth + 1,
                        label: format!("Total {}", group.group_value),
                        stats: aggregate(records, &rows, columns),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;
    use table_model::{FieldValue, Record, ValueKind};

    fn columns() -> Vec<Column> {
        vec![
            Column::new("country", "Country", ValueKind::Text, 100),
            Column::new("manager", "Manager", ValueKind::Text, 160),
            Column::new("age", "Age", ValueKind::Number, 50),
        ]
    }

    fn person(id: &str, country: &str, manager: &str, age: f64) -> Record {
        Record::new(id)
            .with("country", FieldValue::text(country))
            .with("manager", FieldValue::text(manager))
            .with("age", FieldValue::Number(age))
    }

    fn sample_records() -> Vec<Record> {
        vec![
            person("row-0", "Norway", "Lila", 20.0),
            person("row-1", "Germany", "Slaven", 25.0),
            person("row-2", "Canada", "Lila", 30.0),
            person("row-3", "Germany", "Lila", 35.0),
            person("row-4", "Norway", "Slaven", 40.0),
        ]
    }

    fn expanded(ids: &[&str]) -> FxHashSet<NodeId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collapsed_groups_emit_neither_children_nor_subtotal() {
        let records = sample_records();
        let tree = build_tree(&records, &["country".to_string()]);
        let nodes = flatten(&tree, &expanded(&[]), &records, &columns());

        // Three collapsed groups plus the grand total.
        assert_eq!(nodes.len(), 4);
        assert!(matches!(nodes[0], DisplayNode::Group { .. }));
        assert!(matches!(nodes[1], DisplayNode::Group { .. }));
        assert!(matches!(nodes[2], DisplayNode::Group { .. }));
        assert_eq!(nodes[3].id(), GRAND_TOTAL_ID);
    }

    #[test]
    fn test_expanded_group_emits_children_then_subtotal() {
        let records = sample_records();
        let tree = build_tree(&records, &["country".to_string()]);
        let nodes = flatten(&tree, &expanded(&["root/Germany"]), &records, &columns());

        let ids: Vec<&str> = nodes.iter().map(|n| n.id()).collect();
        assert_eq!(
            ids,
            [
                "root/Canada",
                "root/Germany",
                "root/Germany|row-1",
                "root/Germany|row-3",
                "total-root/Germany",
                "root/Norway",
                GRAND_TOTAL_ID,
            ]
        );

        match &nodes[4] {
            DisplayNode::Total { label, depth, stats, .. } => {
                assert_eq!(label, "Total Germany");
                assert_eq!(*depth, 1);
                assert_eq!(stats.get("age"), Some(&60.0));
            }
            _ => panic!("expected subtotal"),
        }
    }

    #[test]
    fn test_inner_collapse_does_not_change_outer_subtotal() {
        let records = sample_records();
        let tree = build_tree(&records, &["country".to_string(), "manager".to_string()]);

        // Expand only Germany; its manager sub-groups stay collapsed.
        let nodes = flatten(&tree, &expanded(&["root/Germany"]), &records, &columns());

        let totals: Vec<&DisplayNode> = nodes.iter().filter(|n| n.is_total()).collect();
        assert_eq!(totals.len(), 2, "only Germany's subtotal and the grand total");
        match totals[0] {
            DisplayNode::Total { label, stats, .. } => {
                assert_eq!(label, "Total Germany");
                // Collapsed inner groups still contribute their leaves.
                assert_eq!(stats.get("age"), Some(&60.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_grand_total_covers_every_leaf_regardless_of_expansion() {
        let records = sample_records();
        for ids in [vec![], vec!["root/Norway"]] {
            let tree = build_tree(&records, &["country".to_string()]);
            let exp: FxHashSet<NodeId> = ids.iter().map(|s| s.to_string()).collect();
            let nodes = flatten(&tree, &exp, &records, &columns());

            let last = nodes.last().expect("non-empty");
            assert_eq!(last.id(), GRAND_TOTAL_ID);
            match last {
                DisplayNode::Total { depth, label, stats, .. } => {
                    assert_eq!(*depth, 0);
                    assert_eq!(label, "Total");
                    assert_eq!(stats.get("age"), Some(&150.0));
                }
                _ => panic!("expected grand total"),
            }
        }
    }

    #[test]
    fn test_empty_record_set_omits_grand_total() {
        let tree = build_tree(&[], &["country".to_string()]);
        let nodes = flatten(&tree, &expanded(&[]), &[], &columns());
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_ungrouped_records_still_get_grand_total() {
        let records = sample_records();
        let tree = build_tree(&records, &[]);
        let nodes = flatten(&tree, &expanded(&[]), &records, &columns());

        assert_eq!(nodes.len(), 6);
        assert!(nodes[..5].iter().all(|n| matches!(n, DisplayNode::Leaf { .. })));
        assert_eq!(nodes[5].id(), GRAND_TOTAL_ID);
    }

    #[test]
    fn test_group_rows_report_expansion_state() {
        let records = sample_records();
        let tree = build_tree(&records, &["country".to_string()]);
        let nodes = flatten(&tree, &expanded(&["root/Canada"]), &records, &columns());

        for node in &nodes {
            if let DisplayNode::Group { id, expanded, .. } = node {
                assert_eq!(*expanded, id == "root/Canada");
            }
        }
    }
}
