//! FILENAME: table-model/src/lib.rs
//! Shared data model for the table widget.
//!
//! This crate provides the types that flow between the data layer and the
//! grouping engine:
//! - `record`: a single table row with typed field values
//! - `column`: static column metadata (id, label, value kind, width)
//! - `sample`: the demo column set and a deterministic row generator
//!
//! The engine crates only ever read these types; records are owned by the
//! caller and treated as immutable snapshots.

pub mod column;
pub mod record;
pub mod sample;

pub use column::*;
pub use record::*;
