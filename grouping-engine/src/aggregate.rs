//! FILENAME: grouping-engine/src/aggregate.rs
//! Aggregator - numeric rollups over a set of leaf records.
//!
//! Only columns of kind `Number` produce an entry; the renderer treats a
//! missing key as "no aggregate", not zero. Missing and non-numeric
//! values coerce to 0.0, so the sum is always finite and the function
//! never fails. Summation runs in the given leaf order, which is
//! deterministic for identical inputs.

use rustc_hash::FxHashMap;

use table_model::{Column, ColumnId, Record};

/// Sums every aggregable column over the leaf records at `rows`.
///
/// An empty row set still yields an entry of 0.0 per numeric column.
pub fn aggregate(
    records: &[Record],
    rows: &[usize],
    columns: &[Column],
) -> FxHashMap<ColumnId, f64> {
    let mut stats = FxHashMap::default();
    for column in columns.iter().filter(|c| c.is_aggregable()) {
        let sum: f64 = rows.iter().map(|&row| records[row].number(&column.id)).sum();
        stats.insert(column.id.clone(), sum);
    }
    stats
}
