//! Mapping engine.
//!
//! A single pass over the rows of a [`RawTable`] driven by the user's
//! [`MappingSelection`]. Experiments and series are created on first
//! encounter and kept in encounter order — the lookup maps are only
//! indexes into the ordered vectors, never iterated.

use std::collections::{BTreeSet, HashMap};

use assay_model::{Cell, Dataset, Experiment, MappingSelection, RawTable, Series, TimeUnit};
use assay_transform::normalize_time_column;

use crate::error::{SelectionError, SelectionErrors};
use crate::metadata::MetaAccumulator;
use crate::types::{MappingOutcome, MappingStats, RowErrors};

/// Label for rows whose experiment cell is blank.
pub const UNLABELED_EXPERIMENT: &str = "Unlabeled experiment";

/// Caller-side context for one mapping run.
#[derive(Debug, Clone)]
pub struct MappingContext {
    /// Name of the produced dataset; also the default experiment label
    /// when no experiment column is mapped and the table has no sheet name.
    pub dataset_name: String,
    /// Unit declared for the time column, when the source carries one.
    /// Falls back to the selection's unit otherwise.
    pub declared_time_unit: Option<TimeUnit>,
}

impl MappingContext {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            declared_time_unit: None,
        }
    }
}

/// Check a selection against a table without running the mapping.
///
/// Returns every blocking error at once so the caller can surface all of
/// them together.
pub fn validate_selection(table: &RawTable, selection: &MappingSelection) -> Vec<SelectionError> {
    let mut errors = Vec::new();
    if selection.time_column.is_none() {
        errors.push(SelectionError::MissingTimeColumn);
    }
    if selection.value_columns.is_empty() {
        errors.push(SelectionError::NoValueColumns);
    }
    let width = table.width();
    for index in selection.structural_columns() {
        if index >= width {
            errors.push(SelectionError::ColumnOutOfRange { index, width });
        }
    }
    errors
}

struct ExperimentBuilder {
    experiment: Experiment,
    series: Vec<Series>,
    series_index: HashMap<(String, Option<String>), usize>,
    meta: MetaAccumulator,
}

impl ExperimentBuilder {
    fn new(label: String) -> Self {
        Self {
            experiment: Experiment::new(label),
            series: Vec::new(),
            series_index: HashMap::new(),
            meta: MetaAccumulator::default(),
        }
    }

    fn series_mut(&mut self, value_column: &str, replicate: Option<&str>) -> &mut Series {
        let key = (value_column.to_string(), replicate.map(str::to_string));
        let index = match self.series_index.get(&key) {
            Some(index) => *index,
            None => {
                let name = match replicate {
                    Some(label) => format!("{value_column} ({label})"),
                    None => value_column.to_string(),
                };
                let series = Series::new(
                    name,
                    value_column.to_string(),
                    replicate.map(str::to_string),
                );
                self.series.push(series);
                let index = self.series.len() - 1;
                self.series_index.insert(key, index);
                index
            }
        };
        &mut self.series[index]
    }

    fn finish(mut self) -> Experiment {
        let (meta_raw, meta_consistency) = self.meta.resolve();
        self.experiment.series = self.series;
        self.experiment.meta_raw = meta_raw;
        self.experiment.meta_consistency = meta_consistency;
        self.experiment
    }
}

/// Apply a mapping selection to a table, building the dataset.
///
/// Soft per-row/per-cell failures never abort the run: an unparsable time
/// cell discards that row for every value column (counted, with the first
/// few row numbers kept verbatim), and an unparsable value cell drops only
/// that point via the series' `dropped_points`.
pub fn apply_selection(
    table: &RawTable,
    selection: &MappingSelection,
    ctx: &MappingContext,
) -> Result<MappingOutcome, SelectionErrors> {
    let errors = validate_selection(table, selection);
    if !errors.is_empty() {
        return Err(SelectionErrors(errors));
    }
    let Some(time_index) = selection.time_column else {
        return Err(SelectionErrors(vec![SelectionError::MissingTimeColumn]));
    };

    let time_cells: Vec<&Cell> = table
        .rows
        .iter()
        .map(|row| row.get(time_index).unwrap_or(&Cell::Null))
        .collect();
    let time = normalize_time_column(&time_cells, ctx.declared_time_unit, selection.time_unit);

    let default_label = table
        .sheet_name
        .clone()
        .unwrap_or_else(|| ctx.dataset_name.clone());
    let structural: BTreeSet<usize> = selection.structural_columns().into_iter().collect();

    // Dedupe while keeping declaration order; a column selected twice is
    // still one series per (experiment, column, replicate) key.
    let mut value_columns: Vec<(usize, &str)> = Vec::new();
    let mut seen_values = BTreeSet::new();
    for &index in &selection.value_columns {
        if seen_values.insert(index) {
            value_columns.push((index, &table.headers[index]));
        }
    }

    let mut builders: Vec<ExperimentBuilder> = Vec::new();
    let mut experiment_index: HashMap<String, usize> = HashMap::new();
    let mut row_errors = RowErrors::default();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let Some(elapsed) = time.seconds.get(row_idx).copied().flatten() else {
            row_errors.record(row_idx + 1);
            continue;
        };

        let label = match selection.experiment_column {
            Some(column) => row
                .get(column)
                .and_then(Cell::render)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| UNLABELED_EXPERIMENT.to_string()),
            None => default_label.clone(),
        };
        let builder_idx = match experiment_index.get(&label) {
            Some(index) => *index,
            None => {
                builders.push(ExperimentBuilder::new(label.clone()));
                let index = builders.len() - 1;
                experiment_index.insert(label, index);
                index
            }
        };
        let builder = &mut builders[builder_idx];

        let replicate = selection
            .replicate_column
            .and_then(|column| row.get(column))
            .and_then(Cell::render)
            .filter(|value| !value.is_empty());

        for &(value_index, header) in &value_columns {
            let cell = row.get(value_index).unwrap_or(&Cell::Null);
            let series = builder.series_mut(header, replicate.as_deref());
            match cell.as_number() {
                Some(value) => series.push_point(elapsed, value),
                None => series.meta.dropped_points += 1,
            }
        }

        for (column_idx, header) in table.headers.iter().enumerate() {
            if structural.contains(&column_idx) {
                continue;
            }
            if let Some(value) = row.get(column_idx).and_then(Cell::render) {
                builder.meta.observe(header, value);
            }
        }
    }

    let mut dataset = Dataset::new(ctx.dataset_name.clone());
    dataset.experiments = builders.into_iter().map(ExperimentBuilder::finish).collect();

    let stats = MappingStats {
        experiment_count: dataset.experiments.len(),
        series_count: dataset.series_count(),
        point_count: dataset.point_count(),
    };
    tracing::debug!(
        experiments = stats.experiment_count,
        series = stats.series_count,
        points = stats.point_count,
        dropped_rows = row_errors.count,
        "mapping applied"
    );

    Ok(MappingOutcome {
        dataset,
        stats,
        row_errors,
        time_kind: time.kind,
        time_reference: time.reference,
        serial_suspect_rows: time.serial_suspects.iter().map(|idx| idx + 1).collect(),
    })
}
