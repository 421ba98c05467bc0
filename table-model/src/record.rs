//! FILENAME: table-model/src/record.rs
//! Records - immutable leaf data for the table widget.
//!
//! A `Record` is one table row: a unique id plus a map from column id to a
//! typed `FieldValue`. The grouping engine never mutates records; it keys
//! everything off their ids and reads field values through `Record::value`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::column::ColumnId;

/// Unique identifier for a record within one input set.
pub type RecordId = String;

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A reference to another entity, e.g. a manager or a company.
/// Grouping always uses the display name, never an internal id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub initials: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>, initials: impl Into<String>) -> Self {
        EntityRef {
            name: name.into(),
            initials: initials.into(),
        }
    }
}

/// A typed value inside a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    /// Dates are carried as their display string (e.g. "22.02.1992");
    /// the engine does not normalize or bucket them.
    Date(String),
    Boolean(bool),
    Reference(EntityRef),
    Color(String),
    Files(Vec<String>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// The string form used as a grouping key. Reference values resolve to
    /// the referenced entity's name; missing and empty values coerce to "".
    pub fn group_label(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format!("{}", n),
            FieldValue::Date(d) => d.clone(),
            FieldValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            FieldValue::Reference(r) => r.name.clone(),
            FieldValue::Color(c) => c.clone(),
            FieldValue::Files(files) => files.join(", "),
        }
    }

    /// The numeric form used for aggregation. Non-numeric and non-finite
    /// values coerce to 0.0 (never NaN).
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) if n.is_finite() => *n,
            _ => 0.0,
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One table row. Field values are keyed by column id; a missing key is
/// treated the same as `FieldValue::Empty` by all consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    fields: FxHashMap<ColumnId, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Record {
            id: id.into(),
            fields: FxHashMap::default(),
        }
    }

    /// Builder-style field setter, used when assembling rows.
    pub fn with(mut self, column: impl Into<ColumnId>, value: FieldValue) -> Self {
        self.fields.insert(column.into(), value);
        self
    }

    pub fn set(&mut self, column: impl Into<ColumnId>, value: FieldValue) {
        self.fields.insert(column.into(), value);
    }

    /// The value stored for a column, if any.
    pub fn value(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// The grouping key for a column. Missing fields coerce to "".
    pub fn group_label(&self, column: &str) -> String {
        self.value(column)
            .map(FieldValue::group_label)
            .unwrap_or_default()
    }

    /// The numeric value for a column. Missing and non-numeric fields
    /// coerce to 0.0.
    pub fn number(&self, column: &str) -> f64 {
        self.value(column).map(FieldValue::as_number).unwrap_or(0.0)
    }
}
