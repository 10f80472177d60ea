//! Column mapping selection and profiling types.
//!
//! A [`MappingSelection`] is what the user declares about a table's columns;
//! [`ColumnHint`]s are what profiling observed about them. Selections are
//! mutated interactively by the caller; the core only ever reads them.

use serde::{Deserialize, Serialize};

/// Unit of a numeric time column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Multiplier from this unit into seconds.
    pub fn factor(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => 86_400.0,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

/// User-declared roles for a table's columns, by column index.
///
/// Valid only when a time column and at least one value column are chosen;
/// value columns need not exclude the experiment/replicate columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSelection {
    pub use_header_row: bool,
    pub time_column: Option<usize>,
    pub value_columns: Vec<usize>,
    pub experiment_column: Option<usize>,
    pub replicate_column: Option<usize>,
    /// Fallback unit for numeric time columns with no declared unit.
    #[serde(default)]
    pub time_unit: TimeUnit,
}

impl MappingSelection {
    /// A selection with just the required roles filled in.
    pub fn new(time_column: usize, value_columns: Vec<usize>) -> Self {
        Self {
            use_header_row: true,
            time_column: Some(time_column),
            value_columns,
            experiment_column: None,
            replicate_column: None,
            time_unit: TimeUnit::default(),
        }
    }

    /// True when the required roles are present.
    pub fn is_complete(&self) -> bool {
        self.time_column.is_some() && !self.value_columns.is_empty()
    }

    /// Column indices that carry a structural role (time, value,
    /// experiment, replicate). Everything else is metadata.
    pub fn structural_columns(&self) -> Vec<usize> {
        let mut columns = Vec::new();
        if let Some(time) = self.time_column {
            columns.push(time);
        }
        columns.extend(self.value_columns.iter().copied());
        if let Some(experiment) = self.experiment_column {
            columns.push(experiment);
        }
        if let Some(replicate) = self.replicate_column {
            columns.push(replicate);
        }
        columns.sort_unstable();
        columns.dedup();
        columns
    }
}

/// Profiling hints about one source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHint {
    /// True when every populated cell is numeric.
    pub is_numeric: bool,
    /// Ratio of distinct populated values to populated cells (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of null cells to total rows (0.0 to 1.0).
    pub null_ratio: f64,
}
