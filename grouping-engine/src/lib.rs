//! FILENAME: grouping-engine/src/lib.rs
//! Hierarchical grouping and aggregation engine for the table widget.
//!
//! This crate turns a flat, already-filtered record set into a renderable
//! sequence of rows: it partitions records into an n-level tree keyed by
//! arbitrary column values, flattens that tree honoring expand/collapse
//! state while injecting subtotal and grand-total rows, and derives a
//! tri-state selection status for every visible row. It depends on
//! `table-model` only for shared types (Record, Column, FieldValue).
//!
//! Layers:
//! - `definition`: Serializable configuration (which columns group the view)
//! - `tree`: Tree builder (records -> Leaf/Group hierarchy)
//! - `aggregate`: Numeric rollups over leaf records
//! - `flatten`: Tree -> ordered display rows with synthetic totals
//! - `selection`: Tri-state selection derived from the selected-leaf set
//! - `state`: Copy-on-write state transitions and the derived view model

pub mod aggregate;
pub mod definition;
pub mod flatten;
pub mod selection;
pub mod state;
pub mod tree;

pub use aggregate::aggregate;
pub use definition::*;
pub use flatten::*;
pub use selection::*;
pub use state::*;
pub use tree::*;
