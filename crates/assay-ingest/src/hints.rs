//! Per-column profiling used by the advisory layer.

use std::collections::{BTreeMap, BTreeSet};

use assay_model::{Cell, ColumnHint, RawTable};

/// Profile every column of a table: numeric-ness, null ratio and unique
/// ratio over the populated cells.
pub fn build_column_hints(table: &RawTable) -> BTreeMap<String, ColumnHint> {
    let mut hints = BTreeMap::new();
    let row_count = table.height();
    for (col_idx, header) in table.headers.iter().enumerate() {
        let mut populated = 0usize;
        let mut numeric = 0usize;
        let mut uniques = BTreeSet::new();
        for row in &table.rows {
            let cell = row.get(col_idx).unwrap_or(&Cell::Null);
            if cell.is_null() {
                continue;
            }
            populated += 1;
            if cell.as_number().is_some() {
                numeric += 1;
            }
            if let Some(rendered) = cell.render() {
                uniques.insert(rendered);
            }
        }
        let null_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count - populated) as f64 / row_count as f64
        };
        let unique_ratio = if populated == 0 {
            0.0
        } else {
            uniques.len() as f64 / populated as f64
        };
        hints.insert(
            header.clone(),
            ColumnHint {
                is_numeric: populated > 0 && numeric == populated,
                unique_ratio,
                null_ratio,
            },
        );
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            vec!["t".to_string(), "grp".to_string()],
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::coerce).collect())
                .collect(),
            None,
        )
    }

    #[test]
    fn numeric_and_categorical_columns_profile_differently() {
        let table = table(vec![
            vec!["0", "A"],
            vec!["1", "A"],
            vec!["2", "B"],
            vec!["3", ""],
        ]);
        let hints = build_column_hints(&table);

        let time = &hints["t"];
        assert!(time.is_numeric);
        assert_eq!(time.unique_ratio, 1.0);
        assert_eq!(time.null_ratio, 0.0);

        let group = &hints["grp"];
        assert!(!group.is_numeric);
        assert_eq!(group.unique_ratio, 2.0 / 3.0);
        assert_eq!(group.null_ratio, 0.25);
    }

    #[test]
    fn empty_table_reports_fully_null_columns() {
        let hints = build_column_hints(&table(vec![]));
        assert_eq!(hints["t"].null_ratio, 1.0);
        assert!(!hints["t"].is_numeric);
    }
}
