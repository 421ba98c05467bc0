//! FILENAME: table-model/src/sample.rs
//! Demo data set for the table widget.
//!
//! Provides the standard ten-column layout plus a deterministic row
//! generator. Values cycle through fixed pools so that tests and benches
//! are reproducible run to run.

use crate::column::{Column, ColumnId, ValueKind};
use crate::record::{EntityRef, FieldValue, Record};

const NAMES: &[&str] = &[
    "Ed Metz",
    "Marit Bjørgen",
    "Kirsty Coventry",
    "Rudy Tremblay",
    "Marlon Stolte",
    "Navid",
    "Adrian",
    "Slaven",
];

const MANAGERS: &[(&str, &str)] = &[
    ("Lila", "L"),
    ("Slaven", "S"),
    ("Adrian", "A"),
    ("Viktoriya", "V"),
    ("Daniel", "D"),
];

const COMPANIES: &[&str] = &["Hintz, Schuppe...", "Global Tech", "Alpha Solutions"];

const COUNTRIES: &[&str] = &["Germany", "Norway", "Zimbabwe", "Canada", "Iran", "Croatia"];

const COLORS: &[&str] = &["#FF424C", "#C218FF", "#0078BD", "#4ADE80"];

const SONGS: &[&str] = &[
    "Nothing Compares 2...",
    "Bohemian Rhapsody",
    "Imagine",
    "Purple Rain",
];

/// The demo column set.
pub fn sample_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name", ValueKind::Text, 220),
        Column::new("age", "Age", ValueKind::Number, 50),
        Column::new("birthday", "Birthday", ValueKind::Date, 100),
        Column::new("manager", "Manager", ValueKind::Reference, 160),
        Column::new("company", "Company", ValueKind::Reference, 180),
        Column::new("external", "External", ValueKind::Boolean, 70),
        Column::new("country", "Country", ValueKind::Text, 100),
        Column::new("favSongs", "Favourite Songs", ValueKind::Text, 250),
        Column::new("favColor", "Favourite Color", ValueKind::Color, 120),
        Column::new("files", "Files", ValueKind::FileList, 80),
    ]
}

/// Generates `count` demo rows with ids "row-0" .. "row-{count-1}".
pub fn generate_rows(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let manager = MANAGERS[i % MANAGERS.len()];
            Record::new(format!("row-{}", i))
                .with("name", FieldValue::text(NAMES[i % NAMES.len()]))
                .with("age", FieldValue::Number((20 + (i * 7) % 40) as f64))
                .with("birthday", FieldValue::Date("22.02.1992".to_string()))
                .with("manager", FieldValue::Reference(EntityRef::new(manager.0, manager.1)))
                .with(
                    "company",
                    FieldValue::Reference(EntityRef::new(COMPANIES[i % COMPANIES.len()], "")),
                )
                .with("external", FieldValue::Boolean(i % 2 == 0))
                .with("country", FieldValue::text(COUNTRIES[i % COUNTRIES.len()]))
                .with("favSongs", FieldValue::text(SONGS[i % SONGS.len()]))
                .with("favColor", FieldValue::Color(COLORS[i % COLORS.len()].to_string()))
                .with(
                    "files",
                    FieldValue::Files(vec!["pdf".into(), "doc".into(), "xls".into()]),
                )
        })
        .collect()
}

/// Convenience lookup for tests: the column with the given id.
pub fn sample_column(id: &str) -> Column {
    sample_columns()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| Column::new(ColumnId::from(id), id, ValueKind::Text, 100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rows_is_deterministic() {
        let a = generate_rows(20);
        let b = generate_rows(20);
        assert_eq!(a.len(), 20);
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.id, rb.id);
            assert_eq!(ra.group_label("country"), rb.group_label("country"));
            assert_eq!(ra.number("age"), rb.number("age"));
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let rows = generate_rows(50);
        let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_sample_columns_match_demo_layout() {
        let columns = sample_columns();
        assert_eq!(columns.len(), 10);
        assert_eq!(columns.iter().filter(|c| c.is_aggregable()).count(), 1);
        assert_eq!(sample_column("age").kind, ValueKind::Number);
        assert_eq!(sample_column("manager").kind, ValueKind::Reference);
    }
}
