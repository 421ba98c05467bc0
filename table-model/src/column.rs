//! FILENAME: table-model/src/column.rs
//! Column descriptors - static metadata for each field of a record.
//!
//! Columns are configuration: loaded once, immutable for the session.
//! The `ValueKind` decides how the grouping engine treats a field
//! (`Number` marks it as aggregable).

use serde::{Deserialize, Serialize};

/// Unique identifier for a column (e.g. "country", "age").
pub type ColumnId = String;

// ============================================================================
// VALUE KINDS
// ============================================================================

/// The kind of value a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Text,
    Number,
    Date,
    Boolean,
    /// A reference to another entity (person, company). Grouping and display
    /// use the referenced entity's name instead of an opaque id.
    Reference,
    Color,
    FileList,
}

// ============================================================================
// COLUMN DESCRIPTOR
// ============================================================================

/// Static metadata for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Unique column id. Records key their field values by this id.
    pub id: ColumnId,

    /// Display label for the column header.
    pub label: String,

    /// The kind of value this column holds.
    pub kind: ValueKind,

    /// Display width hint in pixels. Ignored by the engine.
    pub width: u16,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, label: impl Into<String>, kind: ValueKind, width: u16) -> Self {
        Column {
            id: id.into(),
            label: label.into(),
            kind,
            width,
        }
    }

    /// Whether this column participates in aggregate totals.
    pub fn is_aggregable(&self) -> bool {
        self.kind == ValueKind::Number
    }
}
