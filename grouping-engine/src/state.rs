//! FILENAME: grouping-engine/src/state.rs
//! Table State - the caller-facing state machine and derived view model.
//!
//! All widget state (active group keys, expanded group ids, selected leaf
//! ids) lives here. Every mutation entry point is a pure transition
//! `(old state) -> new state`; nothing is edited in place, so the state
//! is safe to drive from a UI event loop without synchronization.
//!
//! The view model is a wholesale derivation: the tree is rebuilt on every
//! change to records or group keys, and the flattened row list on every
//! change to the tree or the expansion set. Dataset sizes are bounded
//! (hundreds to low thousands of rows), so no incremental patching is
//! attempted.

use log::debug;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use table_model::{Column, Record};

use crate::definition::{EngineError, GroupingDefinition, NodeId};
use crate::flatten::{flatten, DisplayNode};
use crate::selection::{display_status_of, toggle, SelectionStatus};
use crate::tree::{build_tree, collect_group_ids, find_node, TreeNode};

// ============================================================================
// TABLE STATE
// ============================================================================

/// The complete widget state. Records arrive already filtered; the state
/// layer never filters or fetches data itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    /// The filtered record set, in stable iteration order.
    pub records: Vec<Record>,

    /// Static column metadata for the session.
    pub columns: Vec<Column>,

    /// The ordered group-key list.
    pub definition: GroupingDefinition,

    /// Ids of currently expanded groups. Default: all collapsed.
    pub expanded: FxHashSet<NodeId>,

    /// Ids of explicitly selected leaves. Group/total states are derived.
    pub selected: FxHashSet<NodeId>,
}

impl TableState {
    pub fn new(records: Vec<Record>, columns: Vec<Column>) -> Self {
        TableState {
            records,
            columns,
            definition: GroupingDefinition::new(),
            expanded: FxHashSet::default(),
            selected: FxHashSet::default(),
        }
    }

    /// Replaces the record set (e.g. after an external search/filter
    /// pass). Expansion ids stay valid because group ids derive from
    /// values, not positions; selection survives as raw leaf ids, and
    /// ids of filtered-out leaves are harmless until the rows return.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        let mut next = self.clone();
        next.records = records;
        next
    }

    fn tree(&self) -> Vec<TreeNode> {
        build_tree(&self.records, self.definition.keys())
    }

    // ========================================================================
    // GROUP KEY TRANSITIONS
    // ========================================================================

    /// Appends a group key as the innermost level. Any change to the key
    /// list invalidates the expansion set: stale group ids could silently
    /// match different data after a rebuild.
    pub fn add_group_key(&self, column_id: &str) -> Result<Self, EngineError> {
        let definition = self.definition.add_key(column_id, &self.columns)?;
        debug!("group keys -> {:?}", definition.keys());
        Ok(TableState {
            definition,
            expanded: FxHashSet::default(),
            ..self.clone()
        })
    }

    /// Removes a group key and invalidates the expansion set.
    pub fn remove_group_key(&self, column_id: &str) -> Self {
        let definition = self.definition.remove_key(column_id);
        debug!("group keys -> {:?}", definition.keys());
        TableState {
            definition,
            expanded: FxHashSet::default(),
            ..self.clone()
        }
    }

    /// Drops all grouping ("Reset All Grouping").
    pub fn clear_groups(&self) -> Self {
        TableState {
            definition: self.definition.clear(),
            expanded: FxHashSet::default(),
            ..self.clone()
        }
    }

    // ========================================================================
    // EXPANSION TRANSITIONS
    // ========================================================================

    /// Expands a collapsed group or collapses an expanded one.
    pub fn toggle_expansion(&self, node_id: &str) -> Self {
        let mut next = self.clone();
        if !next.expanded.remove(node_id) {
            next.expanded.insert(node_id.to_string());
        }
        next
    }

    /// Expands every group in the current tree.
    pub fn expand_all(&self) -> Self {
        let mut group_ids = Vec::new();
        collect_group_ids(&self.tree(), &mut group_ids);
        debug!("expand all: {} groups", group_ids.len());
        let mut next = self.clone();
        next.expanded = group_ids.into_iter().collect();
        next
    }

    /// Collapses everything.
    pub fn collapse_all(&self) -> Self {
        let mut next = self.clone();
        next.expanded = FxHashSet::default();
        next
    }

    // ========================================================================
    // SELECTION TRANSITIONS
    // ========================================================================

    /// Toggles the leaf subtree of the node with `node_id`. Total rows
    /// and unknown ids are silent no-ops.
    pub fn toggle_selection(&self, node_id: &str) -> Self {
        let tree = self.tree();
        let Some(node) = find_node(&tree, node_id) else {
            return self.clone();
        };
        let mut next = self.clone();
        next.selected = toggle(node, &self.selected);
        next
    }

    // ========================================================================
    // DERIVED VIEW
    // ========================================================================

    /// Recomputes the renderable view model from scratch.
    pub fn view_model(&self) -> TableViewModel {
        let tree = self.tree();
        let nodes = flatten(&tree, &self.expanded, &self.records, &self.columns);
        debug!(
            "view model: {} records -> {} display rows",
            self.records.len(),
            nodes.len()
        );

        let rows = nodes
            .into_iter()
            .map(|node| {
                let status = display_status_of(&node, &tree, &self.selected);
                DisplayRow { node, status }
            })
            .collect();

        TableViewModel {
            rows,
            hit_count: self.records.len(),
            selected_count: self.selected.len(),
        }
    }
}

// ============================================================================
// VIEW MODEL
// ============================================================================

/// One renderable row: the display node plus its derived checkbox state.
/// The renderer handles indentation from `node.depth()` and the checkbox
/// from `status`; the engine supplies nothing visual beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayRow {
    pub node: DisplayNode,
    pub status: SelectionStatus,
}

/// The flattened sequence handed to the rendering layer, plus the footer
/// summary ("{hits} hits | {n} rows selected").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableViewModel {
    pub rows: Vec<DisplayRow>,
    pub hit_count: usize,
    pub selected_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_model::sample::{generate_rows, sample_columns};
    use table_model::{FieldValue, Record};

    fn person(id: &str, country: &str, age: f64) -> Record {
        Record::new(id)
            .with("country", FieldValue::text(country))
            .with("age", FieldValue::Number(age))
    }

    fn sample_state() -> TableState {
        let records = vec![
            person("row-0", "Norway", 20.0),
            person("row-1", "Germany", 25.0),
            person("row-2", "Canada", 30.0),
            person("row-3", "Germany", 35.0),
            person("row-4", "Norway", 40.0),
        ];
        TableState::new(records, sample_columns())
    }

    #[test]
    fn test_key_change_invalidates_expansion() {
        let state = sample_state()
            .add_group_key("country")
            .unwrap()
            .toggle_expansion("root/Germany");
        assert!(!state.expanded.is_empty());

        let after_add = state.add_group_key("manager").unwrap();
        assert!(after_add.expanded.is_empty());

        let state = state.toggle_expansion("root/Norway");
        let after_remove = state.remove_group_key("country");
        assert!(after_remove.expanded.is_empty());
    }

    #[test]
    fn test_add_group_key_rejects_unknown_column() {
        let state = sample_state();
        assert!(state.add_group_key("salary").is_err());
    }

    #[test]
    fn test_clear_groups_resets_to_flat_view() {
        let state = sample_state()
            .add_group_key("country")
            .unwrap()
            .toggle_expansion("root/Germany")
            .clear_groups();

        assert!(state.definition.is_empty());
        assert!(state.expanded.is_empty());
        // Flat view: 5 leaves + grand total.
        assert_eq!(state.view_model().rows.len(), 6);
    }

    #[test]
    fn test_expand_all_then_collapse_all() {
        let state = sample_state()
            .add_group_key("country")
            .unwrap()
            .expand_all();
        assert_eq!(state.expanded.len(), 3);

        let vm = state.view_model();
        // 3 groups + 5 leaves + 3 subtotals + grand total.
        assert_eq!(vm.rows.len(), 12);

        let collapsed = state.collapse_all();
        assert!(collapsed.expanded.is_empty());
        assert_eq!(collapsed.view_model().rows.len(), 4);
    }

    #[test]
    fn test_toggle_selection_on_group_selects_subtree() {
        let state = sample_state().add_group_key("country").unwrap();
        let state = state.toggle_selection("root/Germany");

        assert_eq!(state.selected.len(), 2);
        let vm = state.view_model();
        let germany = vm
            .rows
            .iter()
            .find(|r| r.node.id() == "root/Germany")
            .unwrap();
        assert_eq!(germany.status, SelectionStatus::Checked);
        assert_eq!(vm.selected_count, 2);
    }

    #[test]
    fn test_toggle_selection_on_total_is_a_no_op() {
        let state = sample_state().add_group_key("country").unwrap();
        let next = state.toggle_selection("grand-total");
        assert!(next.selected.is_empty());
        let next = state.toggle_selection("total-root/Germany");
        assert!(next.selected.is_empty());
    }

    #[test]
    fn test_selection_survives_regrouping() {
        let state = sample_state();
        // Select row-1 in the flat view; its leaf id is "root|row-1".
        let state = state.toggle_selection("root|row-1");
        assert_eq!(state.selected.len(), 1);

        // Regrouping keeps the raw id around even though no current leaf
        // matches it; the stale id is harmless.
        let grouped = state.add_group_key("country").unwrap();
        assert_eq!(grouped.selected.len(), 1);
        let vm = grouped.view_model();
        assert_eq!(vm.selected_count, 1);
        assert!(vm.rows.iter().all(|r| r.status != SelectionStatus::Checked));
    }

    #[test]
    fn test_grand_total_age_is_invariant_across_groupings() {
        let state = sample_state();
        for keys in [vec![], vec!["country"], vec!["country", "external"]] {
            let mut s = state.clone();
            for key in keys {
                s = s.add_group_key(key).unwrap();
            }
            let s = s.expand_all();
            let vm = s.view_model();
            let last = vm.rows.last().unwrap();
            match &last.node {
                DisplayNode::Total { stats, .. } => {
                    assert_eq!(stats.get("age"), Some(&150.0));
                }
                _ => panic!("expected grand total last"),
            }
        }
    }

    #[test]
    fn test_view_model_row_order_is_pre_order() {
        let state = sample_state()
            .add_group_key("country")
            .unwrap()
            .expand_all();
        let vm = state.view_model();
        let ids: Vec<&str> = vm.rows.iter().map(|r| r.node.id()).collect();
        assert_eq!(
            ids,
            [
                "root/Canada",
                "root/Canada|row-2",
                "total-root/Canada",
                "root/Germany",
                "root/Germany|row-1",
                "root/Germany|row-3",
                "total-root/Germany",
                "root/Norway",
                "root/Norway|row-0",
                "root/Norway|row-4",
                "total-root/Norway",
                "grand-total",
            ]
        );
    }

    #[test]
    fn test_view_model_scales_to_demo_data() {
        let state = TableState::new(generate_rows(120), sample_columns());
        let state = state
            .add_group_key("manager")
            .unwrap()
            .add_group_key("country")
            .unwrap()
            .expand_all();

        let vm = state.view_model();
        let leaf_count = vm
            .rows
            .iter()
            .filter(|r| matches!(r.node, DisplayNode::Leaf { .. }))
            .count();
        assert_eq!(leaf_count, 120);
        assert_eq!(vm.hit_count, 120);
    }

    #[test]
    fn test_view_model_serde_round_trip() {
        let state = sample_state()
            .add_group_key("country")
            .unwrap()
            .toggle_expansion("root/Germany");
        let vm = state.view_model();

        let json = serde_json::to_string(&vm).unwrap();
        let back: TableViewModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows.len(), vm.rows.len());
        assert_eq!(back.hit_count, 5);
    }
}
