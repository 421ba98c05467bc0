//! FILENAME: grouping-engine/src/definition.rs
//! Grouping Definition - The serializable configuration.
//!
//! This module describes WHICH columns currently group the view. The key
//! list is ordered: insertion order is nesting order (leftmost key is the
//! outermost level). Every mutation returns a new definition rather than
//! editing in place, so callers can hold cheap immutable snapshots.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use table_model::{Column, ColumnId};

/// Stable identifier of a tree/display node, derived from its ancestor
/// path (e.g. "root/Germany/Lila" for a group, "root/Germany|row-3" for
/// a leaf).
pub type NodeId = String;

/// Errors raised when editing a grouping definition. The computation
/// paths (build/aggregate/flatten) never fail; malformed values are
/// normalized at the boundary instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

// ============================================================================
// GROUPING DEFINITION
// ============================================================================

/// The ordered list of active group keys.
///
/// Grouping deeper than four levels is rare, so the key list stays inline
/// in the common case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupingDefinition {
    group_keys: SmallVec<[ColumnId; 4]>,
}

impl GroupingDefinition {
    pub fn new() -> Self {
        GroupingDefinition::default()
    }

    /// Builds a definition from an ordered key list, outermost first.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnId>,
    {
        GroupingDefinition {
            group_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The active keys, outermost to innermost.
    pub fn keys(&self) -> &[ColumnId] {
        &self.group_keys
    }

    pub fn is_empty(&self) -> bool {
        self.group_keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.group_keys.len()
    }

    pub fn contains(&self, column_id: &str) -> bool {
        self.group_keys.iter().any(|k| k == column_id)
    }

    /// Returns a definition with `column_id` appended as the innermost
    /// level. Appending an already-active key is a no-op; an id that does
    /// not name a column is rejected.
    pub fn add_key(&self, column_id: &str, columns: &[Column]) -> Result<Self, EngineError> {
        if !columns.iter().any(|c| c.id == column_id) {
            return Err(EngineError::UnknownColumn(column_id.to_string()));
        }
        if self.contains(column_id) {
            return Ok(self.clone());
        }
        let mut next = self.clone();
        next.group_keys.push(column_id.to_string());
        Ok(next)
    }

    /// Returns a definition without `column_id`. Removing an inactive key
    /// is a no-op.
    pub fn remove_key(&self, column_id: &str) -> Self {
        let mut next = self.clone();
        next.group_keys.retain(|k| k != column_id);
        next
    }

    /// Returns an empty definition ("Reset All Grouping").
    pub fn clear(&self) -> Self {
        GroupingDefinition::new()
    }
}
